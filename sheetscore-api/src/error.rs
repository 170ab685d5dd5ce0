//! Error types for sheetscore-api
//!
//! [`IngestError`] is the pipeline's failure taxonomy. [`ApiError`] turns each
//! outcome into exactly one HTTP response; upstream and storage faults share
//! the same generic 500 body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StorageError;
use crate::sheets::SheetsError;

pub const MSG_MISSING_FIELDS: &str = "Sheet URL and Sheet Name are required";
pub const MSG_INVALID_URL: &str = "Invalid Google Sheet URL";
pub const MSG_NO_DATA: &str = "No data found in Google Sheet";
pub const MSG_NO_VALID_RECORDS: &str = "No valid student data found";
pub const MSG_INTERNAL: &str = "Internal Server Error";
pub const MSG_LIST_FAILED: &str = "Failed to fetch student data";

/// Ingestion pipeline failures
#[derive(Debug, Error)]
pub enum IngestError {
    /// Missing request fields or unrecognizable sheet URL
    #[error("{0}")]
    InvalidInput(&'static str),

    /// Sheet returned no rows beyond the header
    #[error("{}", MSG_NO_DATA)]
    NoData,

    /// Every data row failed admissibility
    #[error("{}", MSG_NO_VALID_RECORDS)]
    NoValidRecords,

    #[error("Upstream spreadsheet service failed: {0}")]
    Upstream(#[from] SheetsError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Read endpoint storage failure
    #[error("Listing students failed: {0}")]
    List(StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ingest(IngestError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::NoData) => StatusCode::NOT_FOUND,
            ApiError::Ingest(IngestError::NoValidRecords) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Ingest(IngestError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::List(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Ingest(IngestError::InvalidInput(msg)) => *msg,
            ApiError::Ingest(IngestError::NoData) => MSG_NO_DATA,
            ApiError::Ingest(IngestError::NoValidRecords) => MSG_NO_VALID_RECORDS,
            ApiError::Ingest(IngestError::Upstream(_) | IngestError::Storage(_)) => MSG_INTERNAL,
            ApiError::List(_) => MSG_LIST_FAILED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.message(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_message_mapping() {
        let cases = [
            (ApiError::from(IngestError::InvalidInput(MSG_MISSING_FIELDS)), 400, MSG_MISSING_FIELDS),
            (ApiError::from(IngestError::InvalidInput(MSG_INVALID_URL)), 400, MSG_INVALID_URL),
            (ApiError::from(IngestError::NoData), 404, MSG_NO_DATA),
            (ApiError::from(IngestError::NoValidRecords), 400, MSG_NO_VALID_RECORDS),
            (
                ApiError::from(IngestError::Upstream(SheetsError::Api(403, "denied".into()))),
                500,
                MSG_INTERNAL,
            ),
            (
                ApiError::from(IngestError::Storage(StorageError::EmptyBatch)),
                500,
                MSG_INTERNAL,
            ),
            (ApiError::List(StorageError::EmptyBatch), 500, MSG_LIST_FAILED),
        ];

        for (error, status, message) in cases {
            assert_eq!(error.status().as_u16(), status, "{:?}", error);
            assert_eq!(error.message(), message);
        }
    }

    #[test]
    fn test_upstream_details_not_leaked_to_client() {
        let error = ApiError::from(IngestError::Upstream(SheetsError::Auth("bad key".into())));
        assert_eq!(error.message(), "Internal Server Error");
        assert!(error.to_string().contains("bad key"));
    }
}
