//! Fixtures for route and seeding tests.

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use calendar_fetcher::{EventFetcher, FetcherConfig, API_KEY_HEADER};
use tokio::net::TcpListener;

use crate::state::AppState;
use crate::store::MemoryEventStore;

pub const TEST_KEY: &str = "test-key";

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Fake upstream answering `/events/` with `status` and `body` for [`TEST_KEY`]
pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
    serve(Router::new().route(
        "/events/",
        get(move |headers: HeaderMap| async move {
            match headers.get(API_KEY_HEADER) {
                Some(key) if key == TEST_KEY => (status, body).into_response(),
                _ => (StatusCode::FORBIDDEN, "forbidden").into_response(),
            }
        }),
    ))
    .await
}

/// Fetcher pointed at a port nobody listens on
pub async fn unreachable_fetcher() -> EventFetcher {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    EventFetcher::new(&FetcherConfig::new(format!("http://{addr}"), TEST_KEY))
}

pub fn state_with(fetcher: EventFetcher) -> (AppState, Arc<MemoryEventStore>) {
    let store = Arc::new(MemoryEventStore::new());
    (AppState::new(store.clone(), fetcher), store)
}

pub async fn state_with_upstream(status: StatusCode, body: &'static str) -> (AppState, Arc<MemoryEventStore>) {
    let base = spawn_upstream(status, body).await;
    state_with(EventFetcher::new(&FetcherConfig::new(base, TEST_KEY)))
}
