use crate::core::error::{ApiError, RequestError};
use crate::core::state::AppState;
use crate::models::query::SelectorQuery;
use crate::models::response::{
    FilesResponse, PeersResponse, StatusResponse, TrackersResponse, STATUS_OK,
};
use crate::request::MulticallRequest;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::info;

/// Per-download actions and listings
///
/// GET|POST /api/torrent/{hash}/start
/// GET|POST /api/torrent/{hash}/stop
/// GET /api/torrent/{hash}/files?args=...
/// GET /api/torrent/{hash}/peers?args=...
/// GET /api/torrent/{hash}/trackers?args=...
pub async fn torrent_handler(
    State(state): State<Arc<AppState>>,
    Path((hash, action)): Path<(String, String)>,
    query: Result<Query<SelectorQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|e| RequestError::InvalidQuery(e.body_text()))?;

    let hash = hash.trim();
    if hash.is_empty() {
        return Err(RequestError::MissingParameter("hash".to_string()).into());
    }

    let args = params.args.as_deref();
    let status = STATUS_OK.to_string();

    let response = match action.as_str() {
        "start" => {
            state.rtorrent.start(hash).await?;
            info!(hash = %hash, "Torrent started");
            Json(StatusResponse::ok()).into_response()
        }
        "stop" => {
            state.rtorrent.stop(hash).await?;
            info!(hash = %hash, "Torrent stopped");
            Json(StatusResponse::ok()).into_response()
        }
        "files" => {
            let request = MulticallRequest::files(hash).with_override(args)?;
            let files = state.rtorrent.multicall(&request).await?;
            Json(FilesResponse { status, files }).into_response()
        }
        "peers" => {
            let request = MulticallRequest::peers(hash).with_override(args)?;
            let peers = state.rtorrent.multicall(&request).await?;
            Json(PeersResponse { status, peers }).into_response()
        }
        "trackers" => {
            let request = MulticallRequest::trackers(hash).with_override(args)?;
            let trackers = state.rtorrent.multicall(&request).await?;
            Json(TrackersResponse { status, trackers }).into_response()
        }
        other => return Err(RequestError::UnknownAction(other.to_string()).into()),
    };

    Ok((StatusCode::OK, response).into_response())
}
