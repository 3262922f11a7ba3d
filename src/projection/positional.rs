use super::field::{Field, Record};
use crate::core::error::DecodeError;
use crate::xmlrpc::Value;

/// Project multicall result rows onto records, one record per row
///
/// `selectors` is the selector list sent with the call, routing tokens
/// excluded. Value `i` of every row belongs to `selectors[i]`. Selectors that
/// name no field of `T` are skipped, as are nil values.
pub fn project_rows<T, S>(result: &Value, selectors: &[S]) -> Result<Vec<T>, DecodeError>
where
    T: Record,
    S: AsRef<str>,
{
    let rows = result.as_array().ok_or(DecodeError::NotRows {
        found: result.kind(),
    })?;

    // Resolve each position to its field once, not once per row
    let fields: Vec<Option<&'static Field<T>>> = selectors
        .iter()
        .map(|selector| T::field(selector.as_ref()))
        .collect();

    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let values = row.as_array().ok_or(DecodeError::RowNotSequence {
            row: index,
            found: row.kind(),
        })?;

        if values.len() != fields.len() {
            return Err(DecodeError::RowLength {
                row: index,
                expected: fields.len(),
                actual: values.len(),
            });
        }

        let mut record = T::default();
        for (field, value) in fields.iter().zip(values) {
            if let Some(field) = field {
                field.apply(&mut record, value)?;
            }
        }
        records.push(record);
    }

    Ok(records)
}
