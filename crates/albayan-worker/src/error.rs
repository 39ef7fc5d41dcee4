use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker HTTP client could not be built: {0}")]
    Client(String),

    #[error("worker did not answer within {0:?}")]
    Timeout(Duration),

    #[error("worker request failed: {0}")]
    Request(String),

    #[error("worker returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("worker response was not JSON: {0}")]
    Decode(String),
}
