//! Google Sheets v4 `values.get` client

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{CellGrid, ServiceAccountAuth, SheetFetcher, SheetsError};

/// Spreadsheets collection endpoint
pub const SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const USER_AGENT: &str = concat!("sheetscore/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// `ValueRange` response body; `values` is omitted entirely for an empty range
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Sheets API client
pub struct GoogleSheetsClient {
    http_client: reqwest::Client,
    auth: ServiceAccountAuth,
    base_url: String,
}

impl GoogleSheetsClient {
    /// HTTP client shared by token exchange and value reads
    pub fn http_client() -> Result<reqwest::Client, SheetsError> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SheetsError::Network(e.to_string()))
    }

    pub fn new(http_client: reqwest::Client, auth: ServiceAccountAuth) -> Self {
        Self {
            http_client,
            auth,
            base_url: SHEETS_API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (local emulator, proxy)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// `{base}/{spreadsheet_id}/values/{range}` with both ids percent-encoded
pub fn values_url(base_url: &str, spreadsheet_id: &str, range: &str) -> Result<Url, SheetsError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| SheetsError::Network(format!("Invalid Sheets API URL {}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| SheetsError::Network(format!("Sheets API URL cannot be a base: {}", base_url)))?
        .pop_if_empty()
        .push(spreadsheet_id)
        .push("values")
        .push(range);

    Ok(url)
}

/// Render one cell as text; the API normally sends strings already
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn into_grid(body: ValueRange) -> CellGrid {
    body.values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect()
}

#[async_trait]
impl SheetFetcher for GoogleSheetsClient {
    async fn fetch(&self, spreadsheet_id: &str, range: &str) -> Result<CellGrid, SheetsError> {
        let url = values_url(&self.base_url, spreadsheet_id, range)?;
        let token = self.auth.access_token().await?;

        tracing::debug!(spreadsheet_id, range, "Querying Sheets API");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api(status.as_u16(), error_text));
        }

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;

        let grid = into_grid(body);
        tracing::debug!(spreadsheet_id, range, rows = grid.len(), "Sheets API read complete");

        Ok(grid)
    }
}
