use super::field::Record;
use crate::core::error::DecodeError;
use crate::xmlrpc::Value;

/// Project the results of a batch of named calls onto one record
///
/// `result` holds one single-value row per call, in call order. The value of
/// call `i` goes to the field tagged `calls[i]`.
pub fn project_calls<T, S>(result: &Value, calls: &[S]) -> Result<T, DecodeError>
where
    T: Record,
    S: AsRef<str>,
{
    let rows = result.as_array().ok_or(DecodeError::NotRows {
        found: result.kind(),
    })?;

    if rows.len() != calls.len() {
        return Err(DecodeError::CallCount {
            expected: calls.len(),
            actual: rows.len(),
        });
    }

    let mut record = T::default();

    for (index, (call, row)) in calls.iter().zip(rows).enumerate() {
        let method = call.as_ref();
        let value = match row.as_array() {
            Some([value]) => value,
            _ => {
                return Err(DecodeError::NotSingleton {
                    call: index,
                    method: method.to_string(),
                });
            }
        };

        if let Some(field) = T::field(method) {
            field.apply(&mut record, value)?;
        }
    }

    Ok(record)
}
