use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::response::{SystemResponse, STATUS_OK};
use crate::request::SystemRequest;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

/// Host, client versions and global throughput in one round trip
///
/// GET /api/system
pub async fn system_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let system = state.rtorrent.system(&SystemRequest::new()).await?;

    Ok((
        StatusCode::OK,
        Json(SystemResponse {
            status: STATUS_OK.to_string(),
            system,
        }),
    )
        .into_response())
}
