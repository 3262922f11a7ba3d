/// Untyped XML-RPC value as carried on the wire
///
/// This is the shape the projection layer consumes: multicall results arrive as
/// `Array` of `Array` of scalars, singleton call batches as `Array` of one-element
/// `Array`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Double(f64),
    String(String),
    /// `dateTime.iso8601`, kept as the raw text
    DateTime(String),
    Base64(Vec<u8>),
    Array(Vec<Value>),
    /// Members in document order
    Struct(Vec<(String, Value)>),
    Nil,
}

impl Value {
    /// Short name of the variant, used in decode error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "boolean",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::DateTime(_) => "dateTime",
            Value::Base64(_) => "base64",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
            Value::Nil => "nil",
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a struct member by name
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_lookup() {
        let value = Value::Struct(vec![
            ("faultCode".to_string(), Value::Int(-501)),
            ("faultString".to_string(), Value::from("Unsupported target type found.")),
        ]);

        assert_eq!(value.member("faultCode"), Some(&Value::Int(-501)));
        assert_eq!(
            value.member("faultString").and_then(Value::as_str),
            Some("Unsupported target type found.")
        );
        assert!(value.member("missing").is_none());
        assert!(Value::Int(1).member("faultCode").is_none());
    }

    #[test]
    fn test_as_array() {
        let value = Value::Array(vec![Value::Int(1), Value::Nil]);
        assert_eq!(value.as_array().map(|a| a.len()), Some(2));
        assert!(Value::from("x").as_array().is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Nil.kind(), "nil");
        assert_eq!(Value::Int(0).kind(), "int");
        assert_eq!(Value::Struct(vec![]).kind(), "struct");
    }
}
