//! Sheet ingestion endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiResult, IngestError, MSG_MISSING_FIELDS};
use crate::AppState;

/// Success message; existing front-ends match on this exact text
pub const MSG_SAVED: &str = "Data successfully saved to MongoDB";

/// Request body; both fields are required but checked by hand so that a
/// missing field gets the documented error instead of a JSON rejection
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSheetRequest {
    #[serde(default)]
    pub sheet_url: Option<String>,
    #[serde(default)]
    pub sheet_name: Option<String>,
}

impl FetchSheetRequest {
    /// Both fields, or `InvalidInput` if either is missing or empty
    pub fn require_fields(&self) -> Result<(&str, &str), IngestError> {
        match (self.sheet_url.as_deref(), self.sheet_name.as_deref()) {
            (Some(url), Some(name)) if !url.is_empty() && !name.is_empty() => Ok((url, name)),
            _ => Err(IngestError::InvalidInput(MSG_MISSING_FIELDS)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSheetResponse {
    pub message: &'static str,
    pub inserted_count: usize,
}

/// POST /fetch-sheet-data
///
/// An absent or unparseable body is treated like an empty one.
pub async fn fetch_sheet_data(
    State(state): State<AppState>,
    body: Option<Json<FetchSheetRequest>>,
) -> ApiResult<Json<FetchSheetResponse>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let (sheet_url, sheet_name) = request.require_fields()?;

    let outcome = state.pipeline.ingest(sheet_url, sheet_name).await?;

    Ok(Json(FetchSheetResponse {
        message: MSG_SAVED,
        inserted_count: outcome.inserted_count,
    }))
}
