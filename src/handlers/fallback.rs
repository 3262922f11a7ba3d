use crate::core::error::ApiError;
use axum::http::Uri;

/// Every unmatched route gets the JSON error envelope with 404
pub async fn fallback_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
