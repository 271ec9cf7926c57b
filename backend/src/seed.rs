use anyhow::Result;
use calendar_fetcher::EventFetcher;

use crate::store::EventStore;

/// Copy the upstream events into the store once at startup.
///
/// Every call inserts a fresh row per upstream event; nothing is matched
/// against rows seeded by an earlier run. An unreachable upstream seeds
/// nothing, and an event the store rejects is logged and skipped.
pub async fn initialize(store: &dyn EventStore, fetcher: &EventFetcher) -> Result<usize> {
    let fetched = fetcher.fetch_events().await;
    tracing::info!(count = fetched.len(), "Seeding events from upstream");

    let mut stored = 0;
    for event in &fetched {
        match store.create_event(event.to_new_event()).await {
            Ok(_) => stored += 1,
            Err(e) => tracing::error!(name = %event.name, "Failed to seed event: {:?}", e),
        }
    }

    tracing::info!(stored, skipped = fetched.len() - stored, "Seeding finished");
    Ok(stored)
}
