use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::encoder::encode_call;
use super::parser::parse_response;
use super::value::Value;
use crate::core::config::RtorrentConfig;
use crate::core::error::RpcError;

/// Performs one RPC round trip and returns the untyped result
///
/// Implementations own connection handling; callers share one instance
/// behind an `Arc` across all request handlers.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError>;
}

/// XML-RPC over HTTP(S) client for the rTorrent SCGI bridge
pub struct XmlRpcClient {
    client: reqwest::Client,
    url: String,
    credentials: Option<(String, String)>,
}

impl XmlRpcClient {
    pub fn new(config: &RtorrentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            url: config.url.clone(),
            credentials,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn transport_error(e: reqwest::Error) -> RpcError {
    if e.is_timeout() {
        RpcError::Timeout
    } else {
        RpcError::Transport(e)
    }
}

#[async_trait]
impl Invoker for XmlRpcClient {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let started = Instant::now();
        let body = encode_call(method, &params);

        let mut request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/xml")
            .body(body);

        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(method = method, status = status.as_u16(), "RPC endpoint returned error status");
            return Err(RpcError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        let result = parse_response(&bytes);

        debug!(
            method = method,
            params = params.len(),
            response_bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "RPC call completed"
        );

        result
    }
}
