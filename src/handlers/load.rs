use crate::core::error::{ApiError, RequestError};
use crate::core::state::AppState;
use crate::models::response::StatusResponse;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

const UPLOAD_FIELD: &str = "file";

/// Upload a .torrent file and start it
///
/// POST /api/load (multipart/form-data, field `file`)
pub async fn load_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart.map_err(|e| RequestError::InvalidUpload(e.body_text()))?;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RequestError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| RequestError::InvalidUpload(e.to_string()))?;

        upload = Some((filename, data));
        break;
    }

    let Some((filename, data)) = upload else {
        warn!("Upload without a file field");
        return Err(RequestError::MissingParameter(UPLOAD_FIELD.to_string()).into());
    };

    if data.is_empty() {
        return Err(RequestError::InvalidUpload("file is empty".to_string()).into());
    }

    let size = data.len();
    state.rtorrent.load_raw_start(data.to_vec()).await?;

    info!(filename = %filename, bytes = size, "Torrent uploaded and started");

    Ok((StatusCode::OK, Json(StatusResponse::ok())).into_response())
}
