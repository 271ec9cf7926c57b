mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod schema;
mod seed;
mod state;
mod store;
mod views;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use calendar_fetcher::EventFetcher;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::routes::{api_routes, page_routes};
use crate::state::AppState;
use crate::store::{EventStore, MemoryEventStore, PgEventStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "calendar_backend=debug,calendar_fetcher=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;

    tracing::info!("Starting events calendar server");

    let store: Arc<dyn EventStore> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url)?;
            tracing::info!("Database connection pool initialized");
            Arc::new(PgEventStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, events are kept in memory");
            Arc::new(MemoryEventStore::new())
        }
    };

    let fetcher = EventFetcher::new(&config.fetcher_config());
    tracing::info!(url = %fetcher.events_url(), "Upstream events endpoint");

    if config.seed_on_startup {
        seed::initialize(store.as_ref(), &fetcher).await?;
    }

    let app = create_app(AppState::new(store, fetcher));

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(page_routes())
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
