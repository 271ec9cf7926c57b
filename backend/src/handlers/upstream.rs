use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calendar_shared::api::KeyCheckResponse;
use calendar_shared::FetchedEvent;

use crate::state::AppState;

/// Report whether the upstream accepts the configured API key
pub async fn check_api_key(State(state): State<AppState>) -> Response {
    match state.fetcher.check_api_key().await {
        Ok(data) => Json(KeyCheckResponse::Success { data }).into_response(),
        Err(err) => {
            tracing::warn!(kind = err.kind(), "API key check failed: {}", err);
            let status = err
                .status()
                .and_then(|status| StatusCode::from_u16(status).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(KeyCheckResponse::failed())).into_response()
        }
    }
}

/// Flat list of upstream events, empty when upstream is unavailable
pub async fn list_upstream_events(State(state): State<AppState>) -> Json<Vec<FetchedEvent>> {
    Json(state.fetcher.fetch_events().await)
}
