use base64::{engine::general_purpose::STANDARD, Engine};

use super::value::Value;
use crate::core::error::RpcError;

type Result<T> = std::result::Result<T, RpcError>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tag<'a> {
    Open(&'a str),
    Close(&'a str),
    Empty(&'a str),
}

/// Parse a `methodResponse` document
///
/// A `<fault>` becomes `RpcError::Fault`. A response without a return value
/// decodes as `Value::Nil`.
pub fn parse_response(body: &[u8]) -> Result<Value> {
    let input = std::str::from_utf8(body)
        .map_err(|e| RpcError::Malformed(format!("response is not UTF-8: {}", e)))?;

    let mut parser = Parser { input, pos: 0 };
    parser.expect_open("methodResponse")?;

    let value = match parser.next_tag()? {
        Tag::Open("params") => match parser.next_tag()? {
            Tag::Open("param") => {
                let value = parser.parse_value()?;
                parser.expect_close("param")?;
                parser.expect_close("params")?;
                value
            }
            Tag::Close("params") => Value::Nil,
            other => return Err(unexpected(other, "<param>")),
        },
        Tag::Empty("params") => Value::Nil,
        Tag::Open("fault") => {
            let fault = parser.parse_value()?;
            parser.expect_close("fault")?;
            return Err(fault_error(&fault));
        }
        other => return Err(unexpected(other, "<params> or <fault>")),
    };

    parser.expect_close("methodResponse")?;

    Ok(value)
}

fn fault_error(fault: &Value) -> RpcError {
    let code = match fault.member("faultCode") {
        Some(Value::Int(code)) => *code,
        _ => 0,
    };
    let message = fault
        .member("faultString")
        .and_then(Value::as_str)
        .unwrap_or("unknown fault")
        .to_string();

    RpcError::Fault { code, message }
}

fn unexpected(tag: Tag<'_>, wanted: &str) -> RpcError {
    let found = match tag {
        Tag::Open(name) => format!("<{}>", name),
        Tag::Close(name) => format!("</{}>", name),
        Tag::Empty(name) => format!("<{}/>", name),
    };
    RpcError::Malformed(format!("expected {}, found {}", wanted, found))
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Skip whitespace, the XML declaration, processing instructions and comments
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            let trimmed = self.rest().trim_start();
            self.pos = self.input.len() - trimmed.len();

            if trimmed.starts_with("<![CDATA[") {
                return Err(RpcError::Malformed(format!(
                    "CDATA section at offset {} is not supported",
                    self.pos
                )));
            }

            let terminator = if trimmed.starts_with("<?") {
                "?>"
            } else if trimmed.starts_with("<!--") {
                "-->"
            } else if trimmed.starts_with("<!") {
                ">"
            } else {
                return Ok(());
            };

            let end = trimmed
                .find(terminator)
                .ok_or_else(|| RpcError::Malformed("unterminated markup declaration".to_string()))?;
            self.pos += end + terminator.len();
        }
    }

    fn next_tag(&mut self) -> Result<Tag<'a>> {
        self.skip_misc()?;

        let rest = self.rest();
        if !rest.starts_with('<') {
            return Err(RpcError::Malformed(format!(
                "expected a tag at offset {}",
                self.pos
            )));
        }

        let end = rest
            .find('>')
            .ok_or_else(|| RpcError::Malformed("unterminated tag".to_string()))?;
        let inner = &rest[1..end];
        self.pos += end + 1;

        let tag = if let Some(name) = inner.strip_prefix('/') {
            Tag::Close(name.trim())
        } else if let Some(body) = inner.strip_suffix('/') {
            Tag::Empty(tag_name(body))
        } else {
            Tag::Open(tag_name(inner))
        };

        Ok(tag)
    }

    fn expect_open(&mut self, name: &str) -> Result<()> {
        match self.next_tag()? {
            Tag::Open(found) if found == name => Ok(()),
            other => Err(unexpected(other, &format!("<{}>", name))),
        }
    }

    fn expect_close(&mut self, name: &str) -> Result<()> {
        match self.next_tag()? {
            Tag::Close(found) if found == name => Ok(()),
            other => Err(unexpected(other, &format!("</{}>", name))),
        }
    }

    /// Raw character data up to the next `<`
    fn read_text(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest.find('<').unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Parse `<value>...</value>` or `<value/>`
    fn parse_value(&mut self) -> Result<Value> {
        match self.next_tag()? {
            Tag::Open("value") => self.parse_value_body(),
            Tag::Empty("value") => Ok(Value::String(String::new())),
            other => Err(unexpected(other, "<value>")),
        }
    }

    fn parse_value_body(&mut self) -> Result<Value> {
        let raw = self.read_text();

        // Untyped content is a string
        if self.rest().starts_with("</value>") {
            self.expect_close("value")?;
            return Ok(Value::String(unescape(raw)?));
        }

        if !raw.trim().is_empty() {
            return Err(RpcError::Malformed(
                "text mixed with a typed value".to_string(),
            ));
        }

        let value = match self.next_tag()? {
            Tag::Empty("nil") | Tag::Empty("ex:nil") => Value::Nil,
            Tag::Empty("string") => Value::String(String::new()),
            Tag::Empty("base64") => Value::Base64(Vec::new()),
            Tag::Open(name) => self.parse_typed(name)?,
            other => return Err(unexpected(other, "a value type")),
        };

        self.expect_close("value")?;

        Ok(value)
    }

    fn parse_typed(&mut self, name: &'a str) -> Result<Value> {
        let value = match name {
            "array" => return self.parse_array(),
            "struct" => return self.parse_struct(),
            "i4" | "int" | "i8" | "ex:i8" => {
                let text = self.read_text().trim();
                let int = text
                    .parse::<i64>()
                    .map_err(|_| RpcError::Malformed(format!("invalid integer '{}'", text)))?;
                Value::Int(int)
            }
            "boolean" => match self.read_text().trim() {
                "1" => Value::Bool(true),
                "0" => Value::Bool(false),
                other => {
                    return Err(RpcError::Malformed(format!("invalid boolean '{}'", other)));
                }
            },
            "double" => {
                let text = self.read_text().trim();
                let double = text
                    .parse::<f64>()
                    .map_err(|_| RpcError::Malformed(format!("invalid double '{}'", text)))?;
                Value::Double(double)
            }
            "string" => Value::String(unescape(self.read_text())?),
            "dateTime.iso8601" => Value::DateTime(unescape(self.read_text().trim())?),
            "base64" => {
                let text: String = self
                    .read_text()
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                let bytes = STANDARD
                    .decode(text.as_bytes())
                    .map_err(|e| RpcError::Malformed(format!("invalid base64: {}", e)))?;
                Value::Base64(bytes)
            }
            "nil" | "ex:nil" => Value::Nil,
            other => {
                return Err(RpcError::Malformed(format!("unknown value type <{}>", other)));
            }
        };

        self.expect_close(name)?;

        Ok(value)
    }

    fn parse_array(&mut self) -> Result<Value> {
        let mut items = Vec::new();

        match self.next_tag()? {
            Tag::Empty("data") => {}
            Tag::Open("data") => loop {
                match self.next_tag()? {
                    Tag::Close("data") => break,
                    Tag::Open("value") => items.push(self.parse_value_body()?),
                    Tag::Empty("value") => items.push(Value::String(String::new())),
                    other => return Err(unexpected(other, "<value> or </data>")),
                }
            },
            other => return Err(unexpected(other, "<data>")),
        }

        self.expect_close("array")?;

        Ok(Value::Array(items))
    }

    fn parse_struct(&mut self) -> Result<Value> {
        let mut members = Vec::new();

        loop {
            match self.next_tag()? {
                Tag::Close("struct") => break,
                Tag::Open("member") => {
                    self.expect_open("name")?;
                    let name = unescape(self.read_text())?;
                    self.expect_close("name")?;
                    let value = self.parse_value()?;
                    self.expect_close("member")?;
                    members.push((name, value));
                }
                other => return Err(unexpected(other, "<member> or </struct>")),
            }
        }

        Ok(Value::Struct(members))
    }
}

/// Element name without attributes
fn tag_name(inner: &str) -> &str {
    let inner = inner.trim();
    inner
        .split(|c: char| c.is_ascii_whitespace())
        .next()
        .unwrap_or(inner)
}

fn unescape(raw: &str) -> Result<String> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find(';')
            .ok_or_else(|| RpcError::Malformed("unterminated entity".to_string()))?;
        let entity = &after[..end];

        let decoded = match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    None
                };
                code.and_then(char::from_u32).ok_or_else(|| {
                    RpcError::Malformed(format!("unknown entity '&{};'", entity))
                })?
            }
        };

        out.push(decoded);
        rest = &after[end + 1..];
    }

    out.push_str(rest);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value_xml: &str) -> Vec<u8> {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse>\n<params>\n<param><value>{}</value></param>\n</params>\n</methodResponse>\n",
            value_xml
        )
        .into_bytes()
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_response(&response("<i4>42</i4>")).unwrap(), Value::Int(42));
        assert_eq!(parse_response(&response("<i8>8589934592</i8>")).unwrap(), Value::Int(8_589_934_592));
        assert_eq!(parse_response(&response("<ex:i8>-1</ex:i8>")).unwrap(), Value::Int(-1));
        assert_eq!(parse_response(&response("<boolean>1</boolean>")).unwrap(), Value::Bool(true));
        assert_eq!(parse_response(&response("<double>1.5</double>")).unwrap(), Value::Double(1.5));
        assert_eq!(
            parse_response(&response("<string>My File</string>")).unwrap(),
            Value::from("My File")
        );
        assert_eq!(parse_response(&response("<nil/>")).unwrap(), Value::Nil);
        assert_eq!(parse_response(&response("<string/>")).unwrap(), Value::from(""));
    }

    #[test]
    fn test_untyped_value_is_string() {
        assert_eq!(
            parse_response(&response("  padded text ")).unwrap(),
            Value::from("  padded text ")
        );
        assert_eq!(parse_response(&response("")).unwrap(), Value::from(""));
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(
            parse_response(&response("<string>a &lt;b&gt; &amp; &quot;c&quot; &#65;&#x42;</string>")).unwrap(),
            Value::from("a <b> & \"c\" AB")
        );
        assert!(parse_response(&response("<string>&bogus;</string>")).is_err());
    }

    #[test]
    fn test_parse_multicall_rows() {
        let xml = "<array><data>\
            <value><array><data><value><string>ABC123</string></value><value><i8>1024</i8></value></data></array></value>\
            <value><array><data><value><string>DEF456</string></value><value><i8>0</i8></value></data></array></value>\
            </data></array>";

        let value = parse_response(&response(xml)).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Array(vec![Value::from("ABC123"), Value::Int(1024)]),
                Value::Array(vec![Value::from("DEF456"), Value::Int(0)]),
            ])
        );
    }

    #[test]
    fn test_parse_empty_array() {
        assert_eq!(
            parse_response(&response("<array><data></data></array>")).unwrap(),
            Value::Array(vec![])
        );
        assert_eq!(
            parse_response(&response("<array><data/></array>")).unwrap(),
            Value::Array(vec![])
        );
    }

    #[test]
    fn test_parse_struct() {
        let xml = "<struct><member><name>faultCode</name><value><i4>-501</i4></value></member>\
                   <member><name>faultString</name><value>Unsupported</value></member></struct>";

        let value = parse_response(&response(xml)).unwrap();
        assert_eq!(value.member("faultCode"), Some(&Value::Int(-501)));
        assert_eq!(value.member("faultString"), Some(&Value::from("Unsupported")));
    }

    #[test]
    fn test_parse_base64() {
        assert_eq!(
            parse_response(&response("<base64>ZDQ6c3Bh\nbWkxZWU=</base64>")).unwrap(),
            Value::Base64(b"d4:spami1ee".to_vec())
        );
    }

    #[test]
    fn test_parse_fault() {
        let body = b"<?xml version=\"1.0\"?><methodResponse><fault><value><struct>\
            <member><name>faultCode</name><value><i4>-506</i4></value></member>\
            <member><name>faultString</name><value><string>Method 'd.bogus' not defined</string></value></member>\
            </struct></value></fault></methodResponse>";

        match parse_response(body) {
            Err(RpcError::Fault { code, message }) => {
                assert_eq!(code, -506);
                assert_eq!(message, "Method 'd.bogus' not defined");
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_response_without_value_is_nil() {
        let body = b"<?xml version=\"1.0\"?><methodResponse><params></params></methodResponse>";
        assert_eq!(parse_response(body).unwrap(), Value::Nil);

        let body = b"<methodResponse><params/></methodResponse>";
        assert_eq!(parse_response(body).unwrap(), Value::Nil);
    }

    #[test]
    fn test_comments_are_skipped() {
        let body = b"<?xml version=\"1.0\"?><!-- generated --><methodResponse><params><param><value><i4>7</i4></value></param></params></methodResponse>";
        assert_eq!(parse_response(body).unwrap(), Value::Int(7));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(parse_response(b"not xml"), Err(RpcError::Malformed(_))));
        assert!(matches!(
            parse_response(b"<methodResponse><params><param><value><i4>x</i4></value></param></params></methodResponse>"),
            Err(RpcError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(b"<methodResponse><params><param><value><i4>1</i4>"),
            Err(RpcError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(&response("<widget>1</widget>")),
            Err(RpcError::Malformed(_))
        ));
        assert!(matches!(parse_response(&[0xff, 0xfe]), Err(RpcError::Malformed(_))));
    }

    #[test]
    fn test_cdata_is_rejected() {
        let result = parse_response(&response("<string><![CDATA[a]]></string>"));
        assert!(matches!(result, Err(RpcError::Malformed(message)) if message.contains("CDATA")));
    }
}
