use axum::{routing::get, Router};

use crate::handlers::{calendar, events, health, upstream};
use crate::state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(calendar::index))
        .route("/calendar/", get(calendar::calendar_html))
        // Event form
        .route(
            "/event/",
            get(events::new_event_form).post(events::submit_new_event),
        )
        .route(
            "/event/:id/",
            get(events::edit_event_form).post(events::submit_event),
        )
        .route("/check-api-key/", get(upstream::check_api_key))
        .route("/health", get(health::health_check))
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/calendar/", get(calendar::calendar_json))
        .route("/upstream-events/", get(upstream::list_upstream_events))
}
