use thiserror::Error;

use crate::schema::SchemaError;

/// Why an upstream fetch produced no events
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body read failure
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with something other than 200
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// 200 response whose body does not match the event schema
    #[error("upstream payload rejected: {0}")]
    Schema(#[from] SchemaError),
}

impl FetchError {
    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Schema(_) => "schema",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
