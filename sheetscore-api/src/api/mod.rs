//! HTTP API handlers for sheetscore-api

pub mod health;
pub mod ingest;
pub mod students;

pub use health::{health_routes, root};
pub use ingest::fetch_sheet_data;
pub use students::list_students;
