use serde::Deserialize;

/// `?args=a,b,c` on the listing endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SelectorQuery {
    pub args: Option<String>,
}
