//! Client for the upstream events API.

mod client;
mod config;
mod error;
mod schema;

pub use client::{group_by_date, EventFetcher, API_KEY_HEADER};
pub use config::FetcherConfig;
pub use error::FetchError;
pub use schema::{parse_events, SchemaError};
