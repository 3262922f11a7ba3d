// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{fallback, health, load, methods, system, torrent, view};
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub fn build_router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.config.server.max_upload_bytes;

    Router::new()
        // Listings
        .route("/api/view/{view}", get(view::view_handler))
        .route("/api/methods", get(methods::methods_handler))
        .route("/api/system", get(system::system_handler))

        // start|stop|files|peers|trackers
        .route(
            "/api/torrent/{hash}/{action}",
            get(torrent::torrent_handler).post(torrent::torrent_handler),
        )

        .route(
            "/api/load",
            post(load::load_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )

        .route("/health", get(health::health_handler))

        // 404 fallback for all unmatched routes
        .fallback(fallback::fallback_handler)

        .with_state(state)
}

/// Router wrapped in request tracing and the per-request deadline
///
/// A request that outlives `request_timeout_secs` is answered with 504.
pub fn build_app(state: Arc<AppState>) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    build_router(state).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                    .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                request_timeout,
            )),
    )
}
