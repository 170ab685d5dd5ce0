//! Sheet-to-store ingestion
//!
//! locate → fetch → drop header → map → filter → single batch insert

pub mod locator;
pub mod mapper;
pub mod pipeline;
pub mod validator;

pub use locator::locate;
pub use mapper::{map_row, parse_points};
pub use pipeline::{IngestOutcome, IngestionPipeline};
pub use validator::{admit, is_admissible};
