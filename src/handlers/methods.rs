use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::response::{MethodsResponse, STATUS_OK};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::debug;

/// GET /api/methods
pub async fn methods_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let methods = state.rtorrent.list_methods().await?;

    debug!(count = methods.len(), "Methods listed");

    Ok((
        StatusCode::OK,
        Json(MethodsResponse {
            status: STATUS_OK.to_string(),
            methods,
        }),
    )
        .into_response())
}
