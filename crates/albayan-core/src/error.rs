use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("schema {name} failed to compile: {reason}")]
    InvalidSchema { name: String, reason: String },

    #[error("record is not a JSON object")]
    NotAnObject,
}
