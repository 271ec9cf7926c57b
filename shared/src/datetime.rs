//! Naive ISO-8601 parsing for upstream payloads and form input.
//!
//! Offsets are accepted but dropped: the wall-clock time written in the text
//! is what gets stored and displayed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// `%#z` takes `Z`, `+HH`, `+HHMM` and `+HH:MM`
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Format used for `datetime-local` inputs.
pub const FORM_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not an ISO-8601 date or date-time")]
pub struct InvalidDateTime(pub String);

pub fn parse_naive_datetime(text: &str) -> Result<NaiveDateTime, InvalidDateTime> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Ok(parsed.naive_local());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| InvalidDateTime(text.to_string()))
}
