use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use albayan_core::error::CoreError;
use albayan_core::validation::Violation;
use albayan_storage::error::StorageError;

use crate::response::{Envelope, Reply};

pub const NOT_FOUND_MESSAGE: &str = "record not found";

pub const INTERNAL_MESSAGE: &str = "Technical unexpected error";

pub const TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input. 400 with the violations as details.
    Validation(Vec<Violation>),
    /// The targeted record does not exist. 404.
    NotFound,
    /// The body exceeded the configured upload limit. 413.
    PayloadTooLarge,
    /// Anything else. 500; the detail is logged, never returned.
    Internal(String),
}

impl ApiError {
    /// A validation failure with a single message.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(vec![Violation {
            message: message.into(),
        }])
    }

    /// Translate an axum extractor rejection. The body-limit rejection keeps
    /// its 413; everything else is a malformed request.
    pub fn from_rejection(status: StatusCode, body_text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::validation(body_text)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            ApiError::Validation(violations) => {
                let joined = violations
                    .iter()
                    .map(|v| v.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    StatusCode::BAD_REQUEST,
                    Envelope::failure(format!("Validation error: {joined}"), Some(violations)),
                )
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Envelope::failure(NOT_FOUND_MESSAGE, None),
            ),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Envelope::failure(TOO_LARGE_MESSAGE, None),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::failure(INTERNAL_MESSAGE, None),
                )
            }
        };

        Reply(status, envelope).into_response()
    }
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        ApiError::Validation(violations)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { .. } => ApiError::NotFound,
            // Keys are freshly generated, so a conflict is a fault, not a client error.
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}
