use serde_json::{Value, json};

use crate::response::Reply;

pub async fn health_check() -> Reply<Value> {
    Reply::ok(json!({ "status": "ok" }))
}
