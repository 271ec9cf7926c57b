use serde::{Deserialize, Serialize};

use crate::calendar::{MonthGrid, MonthToken};
use crate::models::{Event, EventsByDate};

// ============================================================================
// Calendar API Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
}

/// Everything a calendar page shows for one month
#[derive(Debug, Serialize)]
pub struct CalendarPage {
    pub grid: MonthGrid,
    pub prev_month: MonthToken,
    pub next_month: MonthToken,
    pub stored_events: Vec<Event>,
    pub upstream_events: EventsByDate,
}

// ============================================================================
// Upstream Key Check Types
// ============================================================================

pub const KEY_CHECK_FAILED_MESSAGE: &str = "Invalid API key or request failed";

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum KeyCheckResponse {
    Success { data: serde_json::Value },
    Error { message: String },
}

impl KeyCheckResponse {
    pub fn failed() -> Self {
        Self::Error {
            message: KEY_CHECK_FAILED_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}
