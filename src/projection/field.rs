use crate::catalog::EntityKind;
use crate::core::error::DecodeError;
use crate::xmlrpc::Value;

/// Typed destination for one selector
pub enum Setter<T> {
    Int(fn(&mut T, i64)),
    Str(fn(&mut T, String)),
}

impl<T> Setter<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            Setter::Int(_) => "int",
            Setter::Str(_) => "string",
        }
    }
}

/// One `(tag, setter)` entry of a record's descriptor table
pub struct Field<T> {
    pub tag: &'static str,
    pub setter: Setter<T>,
}

impl<T> Field<T> {
    pub const fn int(tag: &'static str, set: fn(&mut T, i64)) -> Self {
        Self {
            tag,
            setter: Setter::Int(set),
        }
    }

    pub const fn string(tag: &'static str, set: fn(&mut T, String)) -> Self {
        Self {
            tag,
            setter: Setter::Str(set),
        }
    }

    /// Assign `value` to this field of `record`
    ///
    /// Nil leaves the field untouched. Integer fields take integers and
    /// booleans, string fields take strings and date-times.
    pub fn apply(&self, record: &mut T, value: &Value) -> Result<(), DecodeError> {
        match (&self.setter, value) {
            (_, Value::Nil) => {}
            (Setter::Int(set), Value::Int(i)) => set(record, *i),
            (Setter::Int(set), Value::Bool(b)) => set(record, i64::from(*b)),
            (Setter::Str(set), Value::String(s) | Value::DateTime(s)) => set(record, s.clone()),
            (setter, other) => {
                return Err(DecodeError::TypeMismatch {
                    tag: self.tag,
                    expected: setter.kind(),
                    found: other.kind(),
                });
            }
        }
        Ok(())
    }
}

/// A record type that can be populated from selector-keyed results
pub trait Record: Default + Sized + 'static {
    const KIND: EntityKind;

    /// Descriptor table. Tags are unique within a type.
    const FIELDS: &'static [Field<Self>];

    fn field(tag: &str) -> Option<&'static Field<Self>> {
        Self::FIELDS.iter().find(|field| field.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        count: i64,
        label: String,
    }

    type F = Field<Sample>;

    impl Record for Sample {
        const KIND: EntityKind = EntityKind::Torrent;
        const FIELDS: &'static [Field<Self>] = &[
            F::int("x.count=", |s, v| s.count = v),
            F::string("x.label=", |s, v| s.label = v),
        ];
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(Sample::field("x.count=").map(|f| f.tag), Some("x.count="));
        assert!(Sample::field("x.count").is_none());
        assert!(Sample::field("x.missing=").is_none());
    }

    #[test]
    fn test_apply_int_and_bool() {
        let mut sample = Sample::default();
        let field = Sample::field("x.count=").unwrap();

        field.apply(&mut sample, &Value::Int(12)).unwrap();
        assert_eq!(sample.count, 12);

        field.apply(&mut sample, &Value::Bool(true)).unwrap();
        assert_eq!(sample.count, 1);
    }

    #[test]
    fn test_apply_string_and_datetime() {
        let mut sample = Sample::default();
        let field = Sample::field("x.label=").unwrap();

        field.apply(&mut sample, &Value::from("hello")).unwrap();
        assert_eq!(sample.label, "hello");

        field
            .apply(&mut sample, &Value::DateTime("20240101T00:00:00".into()))
            .unwrap();
        assert_eq!(sample.label, "20240101T00:00:00");
    }

    #[test]
    fn test_apply_nil_keeps_value() {
        let mut sample = Sample {
            count: 5,
            label: "kept".to_string(),
        };

        Sample::field("x.count=").unwrap().apply(&mut sample, &Value::Nil).unwrap();
        Sample::field("x.label=").unwrap().apply(&mut sample, &Value::Nil).unwrap();

        assert_eq!(sample.count, 5);
        assert_eq!(sample.label, "kept");
    }

    #[test]
    fn test_apply_type_mismatch() {
        let mut sample = Sample::default();

        let err = Sample::field("x.count=")
            .unwrap()
            .apply(&mut sample, &Value::from("12"))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                tag: "x.count=",
                expected: "int",
                found: "string",
            }
        );

        let err = Sample::field("x.label=")
            .unwrap()
            .apply(&mut sample, &Value::Int(3))
            .unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { expected: "string", .. }));
        assert_eq!(sample, Sample::default());
    }
}
