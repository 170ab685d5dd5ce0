//! sheetscore-api library
//!
//! Imports student scoring rows from a Google Sheet into the local store and
//! serves them back over HTTP.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod sheets;

pub use crate::error::{ApiError, ApiResult, IngestError};

/// Build identification stamped in by build.rs
pub mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    /// `git describe` of the source tree, or `unknown`
    pub const REVISION: &str = env!("SHEETSCORE_REVISION");
    /// UTC, RFC 3339
    pub const BUILT_AT: &str = env!("SHEETSCORE_BUILT_AT");
    pub const PROFILE: &str = env!("SHEETSCORE_PROFILE");
}

use crate::db::StudentStore;
use crate::ingest::IngestionPipeline;
use crate::sheets::SheetFetcher;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Sheet → store ingestion
    pub pipeline: IngestionPipeline,
    /// Store backing the read endpoint (same store the pipeline writes)
    pub store: Arc<dyn StudentStore>,
}

impl AppState {
    /// Wire the pipeline and read endpoint to the given collaborators
    pub fn new(fetcher: Arc<dyn SheetFetcher>, store: Arc<dyn StudentStore>) -> Self {
        Self {
            pipeline: IngestionPipeline::new(fetcher, store.clone()),
            store,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/fetch-sheet-data", post(api::fetch_sheet_data))
        .route("/api/students", get(api::list_students))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser front-ends call from other origins
        .layer(CorsLayer::permissive())
}
