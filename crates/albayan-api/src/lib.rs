//! albayan-api
//!
//! HTTP front end for report definitions and report requests. Requests are
//! schema-checked, persisted through `albayan-storage`, and handed to the
//! rendering worker through `albayan-worker`.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod upload;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let output = ServeDir::new(&state.config.output_dir);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Report definitions
        .route("/reports", get(routes::definitions::list_definitions))
        .route("/reports", post(routes::definitions::create_definition))
        .route("/reports/{id}", get(routes::definitions::get_definition))
        .route(
            "/reports/{id}",
            patch(routes::definitions::update_definition),
        )
        .route(
            "/reports/{id}",
            delete(routes::definitions::delete_definition),
        )
        // Report requests
        .route("/reports/{id}/issue", post(routes::requests::issue_report))
        .route("/reports/{id}/issue", get(routes::requests::list_requests))
        .route(
            "/reports/{id}/issue/{request_id}",
            get(routes::requests::get_request),
        )
        .route(
            "/reports/{id}/issue/{request_id}",
            delete(routes::requests::delete_request),
        )
        // Rendered documents written by the worker
        .nest_service("/output", output)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
