use crate::catalog::EntityKind;
use crate::core::error::RequestError;
use crate::xmlrpc::Value;

/// Argument list for one multicall: `[target, view, selector...]`
///
/// The selector order is the column order of the result rows and is handed
/// unchanged to the projection step.
#[derive(Debug, Clone, PartialEq)]
pub struct MulticallRequest {
    kind: EntityKind,
    target: String,
    view: String,
    selectors: Vec<String>,
}

impl MulticallRequest {
    /// All downloads in a named view (`main`, `started`, ...)
    pub fn view(view: &str) -> Self {
        Self::with_defaults(EntityKind::Torrent, String::new(), view.to_string())
    }

    pub fn files(hash: &str) -> Self {
        Self::nested(EntityKind::File, hash)
    }

    pub fn peers(hash: &str) -> Self {
        Self::nested(EntityKind::Peer, hash)
    }

    pub fn trackers(hash: &str) -> Self {
        Self::nested(EntityKind::Tracker, hash)
    }

    fn nested(kind: EntityKind, hash: &str) -> Self {
        Self::with_defaults(kind, hash.to_string(), String::new())
    }

    fn with_defaults(kind: EntityKind, target: String, view: String) -> Self {
        let selectors = kind
            .default_selectors()
            .iter()
            .map(|selector| selector.to_string())
            .collect();

        Self {
            kind,
            target,
            view,
            selectors,
        }
    }

    /// Replace the default selectors with a caller-supplied list, if any
    pub fn with_override(mut self, raw: Option<&str>) -> Result<Self, RequestError> {
        if let Some(raw) = raw {
            self.selectors = parse_selector_override(self.kind, raw)?;
        }
        Ok(self)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn method(&self) -> &'static str {
        self.kind.multicall_method()
    }

    /// Selectors without the two leading routing tokens
    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn params(&self) -> Vec<Value> {
        let mut params = Vec::with_capacity(self.selectors.len() + 2);
        params.push(Value::from(self.target.as_str()));
        params.push(Value::from(self.view.as_str()));
        params.extend(self.selectors.iter().map(|s| Value::from(s.as_str())));
        params
    }
}

/// Build selectors from a comma-separated list of attribute names
///
/// Bare names get the kind's namespace (`hash` → `d.hash=`); a trailing
/// suffix already present is not doubled. Blank pieces are dropped and an
/// empty result is rejected.
pub fn parse_selector_override(kind: EntityKind, raw: &str) -> Result<Vec<String>, RequestError> {
    let prefix = format!("{}.", kind.namespace());
    let suffix = kind.selector_suffix();

    let selectors: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .map(|piece| piece.strip_suffix(suffix).unwrap_or(piece))
        .filter(|name| !name.is_empty())
        .map(|name| {
            if name.starts_with(&prefix) {
                format!("{}{}", name, suffix)
            } else {
                format!("{}{}{}", prefix, name, suffix)
            }
        })
        .collect();

    if selectors.is_empty() {
        return Err(RequestError::EmptySelectorList);
    }

    Ok(selectors)
}

/// Batch of named calls for `system.multicall`
#[derive(Debug, Clone, PartialEq)]
pub struct SystemRequest {
    calls: Vec<String>,
}

impl SystemRequest {
    pub fn new() -> Self {
        Self::with_calls(EntityKind::System.default_selectors().iter().copied())
    }

    pub fn with_calls<I, S>(calls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            calls: calls.into_iter().map(Into::into).collect(),
        }
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// A single parameter: the array of `{methodName, params}` structs
    pub fn params(&self) -> Vec<Value> {
        let calls = self
            .calls
            .iter()
            .map(|method| {
                Value::Struct(vec![
                    ("methodName".to_string(), Value::from(method.as_str())),
                    ("params".to_string(), Value::Array(vec![Value::from("")])),
                ])
            })
            .collect();

        vec![Value::Array(calls)]
    }
}

impl Default for SystemRequest {
    fn default() -> Self {
        Self::new()
    }
}
