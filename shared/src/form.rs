//! Create/edit form for stored events.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::datetime::{parse_naive_datetime, FORM_INPUT_FORMAT};
use crate::models::{Event, NewEvent};

const REQUIRED_MESSAGE: &str = "This field is required.";
const INVALID_DATETIME_MESSAGE: &str = "Enter a valid date/time.";
const END_BEFORE_START_MESSAGE: &str = "End time must not be before start time.";

/// Raw form submission, exactly as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EventForm {
    #[serde(default)]
    #[validate(
        custom = "required",
        length(max = 200, message = "Ensure this value has at most 200 characters.")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(custom = "required")]
    pub start_time: String,

    #[serde(default)]
    #[validate(custom = "required")]
    pub end_time: String,

    #[serde(default)]
    #[validate(custom = "required")]
    pub description: String,
}

/// Field name to error messages, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn extend_from(&mut self, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                self.add(field, message);
            }
        }
    }
}

fn required(value: &str) -> Result<(), ValidationError> {
    if !value.trim().is_empty() {
        return Ok(());
    }
    let mut error = ValidationError::new("required");
    error.message = Some(Cow::Borrowed(REQUIRED_MESSAGE));
    Err(error)
}

impl EventForm {
    /// Pre-filled form for editing an existing event
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            start_time: event.start_time.format(FORM_INPUT_FORMAT).to_string(),
            end_time: event.end_time.format(FORM_INPUT_FORMAT).to_string(),
            description: event.description.clone(),
        }
    }

    /// Validate the submission and convert it into event fields
    pub fn clean(&self) -> Result<NewEvent, FormErrors> {
        let mut errors = FormErrors::default();
        if let Err(validation) = self.validate() {
            errors.extend_from(&validation);
        }

        let mut parse = |field: &'static str, raw: &str| {
            if errors.has(field) {
                return None;
            }
            let parsed = parse_naive_datetime(raw).ok();
            if parsed.is_none() {
                errors.add(field, INVALID_DATETIME_MESSAGE);
            }
            parsed
        };
        let start_time = parse("start_time", &self.start_time);
        let end_time = parse("end_time", &self.end_time);

        match (start_time, end_time) {
            (Some(start_time), Some(end_time)) if errors.is_empty() => {
                if end_time < start_time {
                    errors.add("end_time", END_BEFORE_START_MESSAGE);
                    return Err(errors);
                }
                Ok(NewEvent {
                    title: self.title.trim().to_string(),
                    start_time,
                    end_time,
                    description: self.description.clone(),
                })
            }
            _ => Err(errors),
        }
    }
}
