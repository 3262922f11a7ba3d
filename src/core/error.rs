// Centralized error handling for the gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::models::response::StatusResponse;

/// Result rows that do not honour the multicall contract
///
/// These are protocol-version or programming errors. Fields are never guessed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Expected an array of result rows, got {found}")]
    NotRows { found: &'static str },

    #[error("Result row {row} is not an array (got {found})")]
    RowNotSequence { row: usize, found: &'static str },

    #[error("Result row {row} has {actual} values but {expected} selectors were sent")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Expected {expected} call results, got {actual}")]
    CallCount { expected: usize, actual: usize },

    #[error("Result for call {call} ({method}) is not a single-value array")]
    NotSingleton { call: usize, method: String },

    #[error("Selector {tag} expects {expected}, got {found}")]
    TypeMismatch {
        tag: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unexpected result shape: {0}")]
    UnexpectedShape(String),
}

/// Errors raised while talking to the upstream daemon
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC request timed out")]
    Timeout,

    #[error("RPC endpoint returned HTTP status {0}")]
    Status(u16),

    #[error("RPC fault {code}: {message}")]
    Fault { code: i64, message: String },

    #[error("Malformed RPC response: {0}")]
    Malformed(String),

    #[error("Failed to decode RPC result: {0}")]
    Decode(#[from] DecodeError),
}

/// Caller input that cannot be turned into an upstream call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Selector list is empty")]
    EmptySelectorList,

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Request(RequestError::UnknownAction(_)) => StatusCode::NOT_FOUND,
            ApiError::Request(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rpc(RpcError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Rpc(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self, "Upstream request failed");
        }

        (status, Json(StatusResponse::error(self.to_string()))).into_response()
    }
}
