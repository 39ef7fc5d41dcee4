use axum::extract::State;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use albayan_core::models::Item;
use albayan_core::models::request::IssueReport;
use albayan_core::schema::field;

use crate::error::ApiError;
use crate::extract::{JsonBody, UuidPath};
use crate::response::Reply;
use crate::routes::{DEFINITION_ID, REQUEST_ID};
use crate::state::AppState;

/// Result of issuing a report: the stored request id and whatever the worker
/// replied, or `null` when the worker could not be reached.
#[derive(Debug, Serialize)]
pub struct IssueResult {
    pub report_request_id: Uuid,
    pub report_data: Option<Value>,
}

pub async fn issue_report(
    State(state): State<AppState>,
    path: UuidPath,
    JsonBody(body): JsonBody,
) -> Result<Reply<IssueResult>, ApiError> {
    let template_id = path.get(DEFINITION_ID)?;

    state.schemas.report_data.check(&body)?;
    if state.config.strict_report_data {
        let data = body.get(field::REPORT_DATA).unwrap_or(&Value::Null);
        state.schemas.writer_data.check(data)?;
    }

    let issue: IssueReport =
        serde_json::from_value(body).map_err(|e| ApiError::validation(e.to_string()))?;

    let (request_id, _) = state.requests.create(template_id, issue).await?;

    // The request stays pending either way; the worker can be retried later.
    let report_data = match state.worker.issue(request_id).await {
        Ok(reply) => Some(reply),
        Err(e) => {
            tracing::warn!(
                report_request_id = %request_id,
                error = %e,
                "worker call failed; request left pending"
            );
            None
        }
    };

    Ok(Reply::ok(IssueResult {
        report_request_id: request_id,
        report_data,
    }))
}

/// Every stored request. Not filtered by the definition in the path.
pub async fn list_requests(
    State(state): State<AppState>,
    _path: UuidPath,
) -> Result<Reply<Vec<Item>>, ApiError> {
    let requests = state.requests.list().await?;
    Ok(Reply::ok(requests))
}

pub async fn get_request(
    State(state): State<AppState>,
    path: UuidPath,
) -> Result<Reply<Item>, ApiError> {
    let id = path.get(REQUEST_ID)?;
    let request = state.requests.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Reply::ok(request))
}

pub async fn delete_request(
    State(state): State<AppState>,
    path: UuidPath,
) -> Result<Reply<()>, ApiError> {
    let id = path.get(REQUEST_ID)?;
    state.requests.delete(id).await?;
    Ok(Reply::accepted())
}
