use base64::{engine::general_purpose::STANDARD, Engine};

use super::value::Value;

pub trait XmlRpcEncode {
    fn encode(&self, buf: &mut Vec<u8>);
}

impl XmlRpcEncode for i64 {
    fn encode(&self, buf: &mut Vec<u8>) {
        // i4 is the only integer tag every server understands
        let tag: &[u8] = if i32::try_from(*self).is_ok() { b"i4" } else { b"i8" };

        buf.extend_from_slice(b"<");
        buf.extend_from_slice(tag);
        buf.extend_from_slice(b">");

        let mut buffer = itoa::Buffer::new();
        buf.extend_from_slice(buffer.format(*self).as_bytes());

        buf.extend_from_slice(b"</");
        buf.extend_from_slice(tag);
        buf.extend_from_slice(b">");
    }
}

impl XmlRpcEncode for &str {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b"<string>");
        escape_into(self, buf);
        buf.extend_from_slice(b"</string>");
    }
}

impl XmlRpcEncode for &[u8] {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b"<base64>");
        buf.extend_from_slice(STANDARD.encode(self).as_bytes());
        buf.extend_from_slice(b"</base64>");
    }
}

impl XmlRpcEncode for Value {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b"<value>");
        match self {
            Value::Int(i) => i.encode(buf),
            Value::Bool(b) => {
                buf.extend_from_slice(if *b {
                    b"<boolean>1</boolean>"
                } else {
                    b"<boolean>0</boolean>"
                });
            }
            Value::Double(d) => {
                buf.extend_from_slice(b"<double>");
                buf.extend_from_slice(d.to_string().as_bytes());
                buf.extend_from_slice(b"</double>");
            }
            Value::String(s) => s.as_str().encode(buf),
            Value::DateTime(s) => {
                buf.extend_from_slice(b"<dateTime.iso8601>");
                escape_into(s, buf);
                buf.extend_from_slice(b"</dateTime.iso8601>");
            }
            Value::Base64(bytes) => bytes.as_slice().encode(buf),
            Value::Array(items) => encode_array(items, buf),
            Value::Struct(members) => encode_struct(members, buf),
            Value::Nil => buf.extend_from_slice(b"<nil/>"),
        }
        buf.extend_from_slice(b"</value>");
    }
}

pub fn encode_array(items: &[Value], buf: &mut Vec<u8>) {
    buf.extend_from_slice(b"<array><data>");
    for item in items {
        item.encode(buf);
    }
    buf.extend_from_slice(b"</data></array>");
}

pub fn encode_struct(members: &[(String, Value)], buf: &mut Vec<u8>) {
    buf.extend_from_slice(b"<struct>");
    for (name, value) in members {
        buf.extend_from_slice(b"<member><name>");
        escape_into(name, buf);
        buf.extend_from_slice(b"</name>");
        value.encode(buf);
        buf.extend_from_slice(b"</member>");
    }
    buf.extend_from_slice(b"</struct>");
}

/// Build a complete `methodCall` document
pub fn encode_call(method: &str, params: &[Value]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + params.len() * 48);

    buf.extend_from_slice(b"<?xml version=\"1.0\"?>\n<methodCall><methodName>");
    escape_into(method, &mut buf);
    buf.extend_from_slice(b"</methodName><params>");

    for param in params {
        buf.extend_from_slice(b"<param>");
        param.encode(&mut buf);
        buf.extend_from_slice(b"</param>");
    }

    buf.extend_from_slice(b"</params></methodCall>");

    buf
}

fn escape_into(text: &str, buf: &mut Vec<u8>) {
    for byte in text.bytes() {
        match byte {
            b'<' => buf.extend_from_slice(b"&lt;"),
            b'>' => buf.extend_from_slice(b"&gt;"),
            b'&' => buf.extend_from_slice(b"&amp;"),
            b'"' => buf.extend_from_slice(b"&quot;"),
            _ => buf.push(byte),
        }
    }
}
