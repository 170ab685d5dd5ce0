//! Ingestion orchestration
//!
//! One call makes at most one read from the spreadsheet service and one
//! batch write to the store, strictly in that order. Rows keep their sheet
//! order through mapping and filtering. There is no retry and no dedup
//! against earlier ingestions.

use std::sync::Arc;

use super::{admit, locate, map_row};
use crate::db::StudentStore;
use crate::error::IngestError;
use crate::models::NewStudent;
use crate::sheets::{CellGrid, SheetFetcher};

/// Summary of a committed ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub spreadsheet_id: String,
    /// Data rows read (header excluded)
    pub rows_read: usize,
    pub inserted_count: usize,
    /// Rows dropped for missing identity fields
    pub rejected_count: usize,
}

/// Header-drop, map and filter a fetched grid
///
/// Fails with `NoData` when the grid has no rows past the header and with
/// `NoValidRecords` when no data row is admissible.
pub fn students_from_grid(grid: &CellGrid) -> Result<Vec<NewStudent>, IngestError> {
    if grid.len() < 2 {
        return Err(IngestError::NoData);
    }

    let students: Vec<NewStudent> = grid[1..]
        .iter()
        .map(|row| map_row(row))
        .filter_map(admit)
        .collect();

    if students.is_empty() {
        return Err(IngestError::NoValidRecords);
    }

    Ok(students)
}

/// Sheet → store pipeline over injected collaborators
#[derive(Clone)]
pub struct IngestionPipeline {
    fetcher: Arc<dyn SheetFetcher>,
    store: Arc<dyn StudentStore>,
}

impl IngestionPipeline {
    pub fn new(fetcher: Arc<dyn SheetFetcher>, store: Arc<dyn StudentStore>) -> Self {
        Self { fetcher, store }
    }

    /// Ingest every admissible row of `range` in the sheet at `sheet_url`
    pub async fn ingest(&self, sheet_url: &str, range: &str) -> Result<IngestOutcome, IngestError> {
        let spreadsheet_id = locate(sheet_url)?;

        let grid = self.fetcher.fetch(spreadsheet_id, range).await?;
        let rows_read = grid.len().saturating_sub(1);

        let students = students_from_grid(&grid)?;
        let inserted_count = self.store.insert_batch(&students).await?;

        let outcome = IngestOutcome {
            spreadsheet_id: spreadsheet_id.to_string(),
            rows_read,
            inserted_count,
            rejected_count: rows_read - students.len(),
        };

        tracing::info!(
            spreadsheet_id = %outcome.spreadsheet_id,
            range,
            rows_read = outcome.rows_read,
            inserted = outcome.inserted_count,
            rejected = outcome.rejected_count,
            "Sheet ingested"
        );

        Ok(outcome)
    }
}
