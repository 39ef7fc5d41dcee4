use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::error::WorkerError;

/// HTTP client for the rendering worker.
///
/// Every call is bounded by the timeout given at construction, so an
/// unresponsive worker cannot stall a request handler.
#[derive(Clone)]
pub struct WorkerClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl WorkerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WorkerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WorkerError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn issue_url(&self, report_request_id: Uuid) -> String {
        format!("{}/reports/issue/{report_request_id}", self.base_url)
    }

    /// Ask the worker to render a stored report request.
    ///
    /// Returns the worker's JSON reply. Transport failures, timeouts, non-2xx
    /// statuses and non-JSON bodies are all errors; nothing is retried.
    pub async fn issue(&self, report_request_id: Uuid) -> Result<Value, WorkerError> {
        let url = self.issue_url(report_request_id);
        tracing::debug!(url = %url, "calling worker");

        let resp = self.http.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                WorkerError::Timeout(self.timeout)
            } else {
                WorkerError::Request(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WorkerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                WorkerError::Timeout(self.timeout)
            } else {
                WorkerError::Decode(e.to_string())
            }
        })
    }
}
