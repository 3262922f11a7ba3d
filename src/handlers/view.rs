use crate::core::error::{ApiError, RequestError};
use crate::core::state::AppState;
use crate::models::query::SelectorQuery;
use crate::models::response::{ViewResponse, STATUS_OK};
use crate::models::Torrent;
use crate::request::MulticallRequest;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::info;

/// List the downloads in a view
///
/// GET /api/view/{view}?args=hash,name,size_bytes
pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
    query: Result<Query<SelectorQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|e| RequestError::InvalidQuery(e.body_text()))?;

    let view = view.trim();
    if view.is_empty() {
        return Err(RequestError::MissingParameter("view".to_string()).into());
    }

    let request = MulticallRequest::view(view).with_override(params.args.as_deref())?;
    let torrents: Vec<Torrent> = state.rtorrent.multicall(&request).await?;

    info!(view = %view, count = torrents.len(), "View listed");

    Ok((
        StatusCode::OK,
        Json(ViewResponse {
            status: STATUS_OK.to_string(),
            torrents,
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{body_json, create_test_state};
    use crate::rtorrent::mock::MockInvoker;
    use crate::xmlrpc::Value;
    use axum::http::Uri;

    fn row(hash: &str, name: &str) -> Value {
        Value::Array(vec![Value::from(hash), Value::from(name)])
    }

    #[tokio::test]
    async fn test_view_with_selector_override() {
        let mock = Arc::new(MockInvoker::new().reply(
            "d.multicall2",
            Value::Array(vec![row("abc123", "My File"), row("def456", "Other")]),
        ));
        let state = create_test_state(mock.clone());

        let params = SelectorQuery {
            args: Some("hash,name".to_string()),
        };
        let response = view_handler(State(state), Path("main".to_string()), Ok(Query(params)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["torrents"][0]["hash"], "abc123");
        assert_eq!(body["torrents"][0]["name"], "My File");
        assert_eq!(body["torrents"][0]["size_bytes"], 0);
        assert_eq!(body["torrents"][1]["hash"], "def456");

        let calls = mock.calls();
        assert_eq!(calls[0].1[1], Value::from("main"));
    }

    #[tokio::test]
    async fn test_view_null_leaves_zero_value() {
        let mock = Arc::new(MockInvoker::new().reply(
            "d.multicall2",
            Value::Array(vec![Value::Array(vec![Value::from("abc123"), Value::Nil])]),
        ));
        let state = create_test_state(mock);

        let params = SelectorQuery {
            args: Some("d.hash=,d.name=".to_string()),
        };
        let response = view_handler(State(state), Path("main".to_string()), Ok(Query(params)))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["torrents"][0]["hash"], "abc123");
        assert_eq!(body["torrents"][0]["name"], "");
    }

    #[tokio::test]
    async fn test_view_empty_override_is_bad_request() {
        let mock = Arc::new(MockInvoker::new());
        let state = create_test_state(mock.clone());

        let params = SelectorQuery {
            args: Some(" , ".to_string()),
        };
        let result = view_handler(State(state), Path("main".to_string()), Ok(Query(params))).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_view_short_row_is_bad_gateway() {
        let mock = Arc::new(MockInvoker::new().reply(
            "d.multicall2",
            Value::Array(vec![Value::Array(vec![Value::from("abc123")])]),
        ));
        let state = create_test_state(mock);

        let params = SelectorQuery {
            args: Some("hash,name".to_string()),
        };
        let result = view_handler(State(state), Path("main".to_string()), Ok(Query(params))).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_view_rejected_query_uses_envelope() {
        let mock = Arc::new(MockInvoker::new());
        let state = create_test_state(mock.clone());

        let query = Query::<SelectorQuery>::try_from_uri(&Uri::from_static(
            "/api/view/main?args=hash&args=name",
        ));
        assert!(query.is_err());

        let response = view_handler(State(state), Path("main".to_string()), query)
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("args"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_view_upstream_timeout() {
        let mock = Arc::new(MockInvoker::new().timeout("d.multicall2"));
        let state = create_test_state(mock);

        let result = view_handler(
            State(state),
            Path("main".to_string()),
            Ok(Query(SelectorQuery::default())),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
