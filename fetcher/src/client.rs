use calendar_shared::{EventsByDate, FetchedEvent};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::schema::parse_events;

/// Header carrying the upstream API key
pub const API_KEY_HEADER: &str = "api-key";

#[derive(Debug, Clone)]
pub struct EventFetcher {
    client: reqwest::Client,
    events_url: String,
    api_key: String,
}

impl EventFetcher {
    pub fn new(config: &FetcherConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &FetcherConfig) -> Self {
        Self {
            client,
            events_url: config.events_url(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn events_url(&self) -> &str {
        &self.events_url
    }

    async fn request(&self) -> Result<reqwest::Response, FetchError> {
        let response = self
            .client
            .get(&self.events_url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Fetch and validate the upstream events, reporting why nothing came back
    pub async fn try_fetch_events(&self) -> Result<Vec<FetchedEvent>, FetchError> {
        let body = self.request().await?.bytes().await?;
        let events = parse_events(&body)?;
        tracing::debug!(count = events.len(), "Fetched upstream events");
        Ok(events)
    }

    /// Upstream events in upstream order; empty when the API is unusable.
    ///
    /// Failures are logged, not returned. Use [`Self::try_fetch_events`] to
    /// tell an outage apart from an empty calendar.
    pub async fn fetch_events(&self) -> Vec<FetchedEvent> {
        match self.try_fetch_events().await {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(
                    kind = err.kind(),
                    url = %self.events_url,
                    "Upstream events unavailable: {}",
                    err
                );
                Vec::new()
            }
        }
    }

    pub async fn fetch_events_by_date(&self) -> EventsByDate {
        group_by_date(self.fetch_events().await)
    }

    /// Raw upstream body, used to verify the configured API key
    pub async fn check_api_key(&self) -> Result<Value, FetchError> {
        Ok(self.request().await?.json::<Value>().await?)
    }
}

/// Group events by start date, keeping upstream order within each day
pub fn group_by_date(events: Vec<FetchedEvent>) -> EventsByDate {
    let mut by_date = EventsByDate::new();
    for event in events {
        by_date.entry(event.date()).or_default().push(event);
    }
    by_date
}
