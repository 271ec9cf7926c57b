use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest event title kept by the store, in characters
pub const TITLE_MAX_CHARS: usize = 200;

/// Upstream events grouped by the calendar date they start on
pub type EventsByDate = BTreeMap<NaiveDate, Vec<FetchedEvent>>;

/// Locally stored calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub description: String,
}

/// Field values for creating or replacing an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub description: String,
}

impl Event {
    pub fn from_new(id: Uuid, new: NewEvent) -> Self {
        Self {
            id,
            title: new.title,
            start_time: new.start_time,
            end_time: new.end_time,
            description: new.description,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

/// Event as delivered by the upstream events API.
///
/// Fields beyond the four the calendar relies on are kept verbatim in
/// `extra` so that list views can pass them through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedEvent {
    pub name: String,
    pub start_time: NaiveDateTime,
    /// Length of the event in whole hours
    pub duration: u32,
    pub short_description: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FetchedEvent {
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// `start_time` plus `duration` hours, `None` past the representable range
    pub fn checked_end_time(&self) -> Option<NaiveDateTime> {
        self.start_time
            .checked_add_signed(Duration::hours(i64::from(self.duration)))
    }

    /// Saturates at [`NaiveDateTime::MAX`]; payloads from the fetcher are
    /// already checked to stay in range.
    pub fn end_time(&self) -> NaiveDateTime {
        self.checked_end_time().unwrap_or(NaiveDateTime::MAX)
    }

    /// Stored form of this event; names longer than [`TITLE_MAX_CHARS`]
    /// are cut to fit.
    pub fn to_new_event(&self) -> NewEvent {
        NewEvent {
            title: self.name.chars().take(TITLE_MAX_CHARS).collect(),
            start_time: self.start_time,
            end_time: self.end_time(),
            description: self.short_description.clone(),
        }
    }
}
