//! Liveness endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{build_info, AppState};

/// Health check response: status, module name, version and build stamp
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub revision: String,
    pub built_at: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "sheetscore-api".to_string(),
        version: build_info::VERSION.to_string(),
        revision: build_info::REVISION.to_string(),
        built_at: build_info::BUILT_AT.to_string(),
    })
}

/// GET /
pub async fn root() -> &'static str {
    "Api is working!"
}

/// Build liveness routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
