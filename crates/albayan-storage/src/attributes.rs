//! JSON <-> DynamoDB attribute conversion.
//!
//! Records are JSON objects; DynamoDB stores them as maps of typed attribute
//! values. Null, bool, number, string, list and map convert both ways without
//! loss. Set types read back as lists; binary attributes are rejected.

use std::collections::HashMap;

use albayan_core::models::Item;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};

use crate::error::StorageError;

pub type AttributeMap = HashMap<String, AttributeValue>;

pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(to_attribute_map(map)),
    }
}

pub fn to_attribute_map(item: &Item) -> AttributeMap {
    item.iter()
        .map(|(k, v)| (k.clone(), to_attribute(v)))
        .collect()
}

pub fn from_attribute(attribute: &AttributeValue) -> Result<Value, StorageError> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(from_attribute)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(from_attribute_map(map)?),
        AttributeValue::Ss(strings) => {
            Value::Array(strings.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(numbers) => Value::Array(
            numbers
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => {
            return Err(StorageError::Attribute(format!(
                "unsupported attribute type: {other:?}"
            )));
        }
    };
    Ok(value)
}

pub fn from_attribute_map(map: &AttributeMap) -> Result<Item, StorageError> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), from_attribute(v)?)))
        .collect()
}

fn parse_number(raw: &str) -> Result<Number, StorageError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Number::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StorageError::Attribute(format!("invalid number: {raw}")))
}
