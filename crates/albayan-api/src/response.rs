use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use albayan_core::validation::Violation;

pub const SUCCESS_MESSAGE: &str = "successful";

/// Uniform body of every API response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub details: Option<Vec<Violation>>,
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            details: None,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Success with no payload (`data: null`).
    pub fn empty() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            details: None,
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>, details: Option<Vec<Violation>>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details,
            data: None,
        }
    }
}

/// An envelope paired with its status code.
pub struct Reply<T>(pub StatusCode, pub Envelope<T>);

impl<T: Serialize> Reply<T> {
    pub fn ok(data: T) -> Self {
        Self(StatusCode::OK, Envelope::ok(data))
    }

    pub fn created(data: T) -> Self {
        Self(StatusCode::CREATED, Envelope::ok(data))
    }
}

impl Reply<()> {
    pub fn accepted() -> Self {
        Self(StatusCode::ACCEPTED, Envelope::empty())
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}
