//! Validation of the upstream `/events/` payload.
//!
//! The body must be a JSON array of objects. Each object needs `name`,
//! `start_time`, `duration` and `short_description`; anything else is kept
//! as-is. The first violation rejects the whole payload.

use calendar_shared::datetime::parse_naive_datetime;
use calendar_shared::FetchedEvent;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON array")]
    NotAnArray,

    #[error("event #{index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("event #{index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("event #{index} has invalid `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

pub fn parse_events(body: &[u8]) -> Result<Vec<FetchedEvent>, SchemaError> {
    let Value::Array(items) = serde_json::from_slice::<Value>(body)? else {
        return Err(SchemaError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => parse_event(index, fields),
            _ => Err(SchemaError::NotAnObject { index }),
        })
        .collect()
}

fn parse_event(index: usize, mut fields: Map<String, Value>) -> Result<FetchedEvent, SchemaError> {
    let mut take = |field: &'static str| {
        fields
            .remove(field)
            .ok_or(SchemaError::MissingField { index, field })
    };

    let name = take("name")?;
    let start_time = take("start_time")?;
    let duration = take("duration")?;
    let short_description = take("short_description")?;

    let start_time = expect_string(index, "start_time", start_time)?;
    let start_time =
        parse_naive_datetime(&start_time).map_err(|err| SchemaError::InvalidField {
            index,
            field: "start_time",
            reason: err.to_string(),
        })?;

    let event = FetchedEvent {
        name: expect_string(index, "name", name)?,
        start_time,
        duration: parse_hours(index, duration)?,
        short_description: expect_string(index, "short_description", short_description)?,
        extra: fields,
    };

    if event.checked_end_time().is_none() {
        return Err(SchemaError::InvalidField {
            index,
            field: "duration",
            reason: format!("{} hours after {} is out of range", event.duration, event.start_time),
        });
    }

    Ok(event)
}

fn expect_string(index: usize, field: &'static str, value: Value) -> Result<String, SchemaError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(SchemaError::InvalidField {
            index,
            field,
            reason: format!("expected a string, got {other}"),
        }),
    }
}

/// Whole hours, given either as a JSON integer or as a decimal string
fn parse_hours(index: usize, value: Value) -> Result<u32, SchemaError> {
    let invalid = |reason: String| SchemaError::InvalidField {
        index,
        field: "duration",
        reason,
    };

    match &value {
        Value::Number(number) => number
            .as_u64()
            .and_then(|hours| u32::try_from(hours).ok())
            .ok_or_else(|| invalid(format!("{number} is not a non-negative whole number of hours"))),
        Value::String(text) => text
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid(format!("'{text}' is not a non-negative whole number of hours"))),
        other => Err(invalid(format!("expected a number, got {other}"))),
    }
}
