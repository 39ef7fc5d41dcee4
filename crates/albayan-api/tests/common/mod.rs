#![allow(dead_code)]

use std::sync::Arc;

use albayan_api::config::{ApiConfig, TableBackend};
use albayan_api::state::AppState;
use albayan_core::tables;
use albayan_storage::memory::MemoryTable;
use albayan_storage::table::RecordTable;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const BOUNDARY: &str = "albayan-test-boundary";

/// A router over in-memory tables, with its upload folder in a temp dir.
pub struct TestApp {
    pub router: Router,
    pub definitions: Arc<MemoryTable>,
    pub processing: Arc<MemoryTable>,
    pub uploads: TempDir,
    pub output: TempDir,
}

/// Base config for tests. The worker URL points at a port nothing listens on.
pub async fn test_config(uploads: &TempDir, output: &TempDir) -> ApiConfig {
    ApiConfig {
        table_backend: TableBackend::Memory,
        worker_url: unreachable_url().await,
        worker_timeout_secs: 2,
        upload_dir: uploads.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
        ..ApiConfig::default()
    }
}

pub async fn app() -> TestApp {
    app_with(|_| {}).await
}

pub async fn app_with(tweak: impl FnOnce(&mut ApiConfig)) -> TestApp {
    let uploads = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut config = test_config(&uploads, &output).await;
    tweak(&mut config);

    let definitions = Arc::new(MemoryTable::new(
        &config.definition_table,
        tables::DEFINITIONS.key_field,
    ));
    let processing = Arc::new(MemoryTable::new(
        &config.processing_table,
        tables::REQUESTS.key_field,
    ));

    let state = AppState::new(config, definitions.clone(), processing.clone()).unwrap();

    TestApp {
        router: albayan_api::router(state),
        definitions,
        processing,
        uploads,
        output,
    }
}

/// A router whose definitions live in `definitions`, plus its upload folder.
pub async fn app_over(definitions: Arc<dyn RecordTable>) -> (Router, TempDir) {
    let uploads = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let config = test_config(&uploads, &output).await;
    let processing = Arc::new(MemoryTable::new(
        &config.processing_table,
        tables::REQUESTS.key_field,
    ));

    let state = AppState::new(config, definitions, processing).unwrap();
    (albayan_api::router(state), uploads)
}

/// Send `request` through `router` and decode the envelope.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        send(&self.router, request).await
    }

    pub fn uploaded_files(&self) -> usize {
        file_count(&self.uploads)
    }
}

pub fn file_count(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

pub fn json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A multipart form with text `fields` and an optional `(filename, contents)`
/// file part.
pub fn multipart(
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, contents)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/vnd.oasis.opendocument.text\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL whose port was free a moment ago.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
