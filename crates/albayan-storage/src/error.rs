use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("record not found: {table}/{key}")]
    NotFound { table: String, key: String },

    #[error("record already exists: {table}/{key}")]
    Conflict { table: String, key: String },

    #[error("record in {table} has no string key field {field}")]
    MissingKey { table: String, field: String },

    #[error("attribute conversion error: {0}")]
    Attribute(String),

    #[error("DynamoDB PutItem error: {0}")]
    PutItem(String),

    #[error("DynamoDB GetItem error: {0}")]
    GetItem(String),

    #[error("DynamoDB UpdateItem error: {0}")]
    UpdateItem(String),

    #[error("DynamoDB DeleteItem error: {0}")]
    DeleteItem(String),

    #[error("DynamoDB Scan error: {0}")]
    Scan(String),
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
