//! Unified error handling for the calendar routes.
//!
//! Handlers return [`ApiResult`] and use `?` freely; the error is turned into
//! a JSON [`ErrorResponse`] with a fitting status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calendar_shared::api::ErrorResponse;
use calendar_shared::FormatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed `month` query parameter
    #[error("Invalid month: {0}")]
    InvalidMonth(#[from] FormatError),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Store or other internal failure
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidMonth(e) => {
                tracing::warn!("Rejected month token: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("invalid_month", e.to_string()),
                )
            }
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("not_found", format!("{} not found", resource)),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(
                        "internal_error",
                        "Internal server error",
                        e.to_string(),
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, AppError>;
