use std::sync::Arc;

use calendar_fetcher::EventFetcher;

use crate::store::EventStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub fetcher: Arc<EventFetcher>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, fetcher: EventFetcher) -> Self {
        Self {
            store,
            fetcher: Arc::new(fetcher),
        }
    }
}
