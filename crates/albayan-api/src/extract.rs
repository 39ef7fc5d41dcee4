//! Request extractors that fail into the API envelope instead of axum's
//! plain-text rejections.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Path parameters, every one checked against the UUID schema before the
/// handler runs.
#[derive(Debug)]
pub struct UuidPath(Map<String, Value>);

impl UuidPath {
    /// A parameter as a UUID. The schema check has already run, so a parse
    /// failure here means the route and the handler disagree on names.
    pub fn get(&self, name: &str) -> Result<Uuid, ApiError> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or_else(|| ApiError::Internal(format!("missing path parameter {name}")))
    }
}

impl FromRequestParts<AppState> for UuidPath {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<BTreeMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;

        let params: Map<String, Value> = raw
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();

        state.schemas.uuid.check_params(&params)?;
        Ok(Self(params))
    }
}

/// A JSON request body, left untyped so it can be schema-checked first.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
        Ok(Self(value))
    }
}
