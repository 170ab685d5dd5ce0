//! Google Sheets access
//!
//! [`SheetFetcher`] is the seam between the ingestion pipeline and the
//! spreadsheet service. Production uses [`GoogleSheetsClient`]; tests plug in
//! their own implementation.

pub mod auth;
pub mod client;

pub use auth::ServiceAccountAuth;
pub use client::GoogleSheetsClient;

use async_trait::async_trait;
use thiserror::Error;

/// Raw cell grid, row-major; rows may be ragged when trailing cells are empty
pub type CellGrid = Vec<Vec<String>>;

/// Spreadsheet service errors
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Sheets API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

/// Reads a range of cell values from a spreadsheet
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    /// Fetch every cell in `range` of spreadsheet `spreadsheet_id`
    ///
    /// One outbound call, no retry.
    async fn fetch(&self, spreadsheet_id: &str, range: &str) -> Result<CellGrid, SheetsError>;
}
