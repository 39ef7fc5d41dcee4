pub mod definition;
pub mod request;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// A stored record: a flat JSON object keyed by attribute name.
pub type Item = Map<String, Value>;

/// Encode a typed model as a stored record.
pub fn to_item<T: Serialize>(value: &T) -> Result<Item, CoreError> {
    match serde_json::to_value(value)? {
        Value::Object(item) => Ok(item),
        _ => Err(CoreError::NotAnObject),
    }
}
