//! Student persistence
//!
//! [`StudentStore`] is the storage seam used by the ingestion pipeline and the
//! read endpoint; [`SqliteStudentStore`] is the production implementation.

mod students;

pub use students::SqliteStudentStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewStudent, StudentRecord};

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Empty batch")]
    EmptyBatch,

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

/// Append-only student storage
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Persist a non-empty batch; all records commit or none do
    ///
    /// Returns the number of records stored.
    async fn insert_batch(&self, students: &[NewStudent]) -> Result<usize, StorageError>;

    /// Every stored record, in insertion order
    async fn list_all(&self) -> Result<Vec<StudentRecord>, StorageError>;
}
