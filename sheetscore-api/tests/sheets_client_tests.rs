//! Sheets API client tests against a local stand-in for Google
//!
//! One axum server plays both the OAuth token endpoint and the
//! `values.get` endpoint, so the real reqwest path is exercised:
//! token exchange and caching, bearer header, status mapping and body decoding.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sheetscore_api::sheets::{GoogleSheetsClient, ServiceAccountAuth, SheetFetcher, SheetsError};
use sheetscore_common::credentials::ServiceAccountKey;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_service_account_key.pem");
const TEST_TOKEN: &str = "test-token";

#[derive(Default)]
struct Recorded {
    token_requests: AtomicUsize,
    authorization: Mutex<Vec<Option<String>>>,
}

async fn token(State(recorded): State<Arc<Recorded>>) -> Json<serde_json::Value> {
    recorded.token_requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "access_token": TEST_TOKEN, "expires_in": 3600, "token_type": "Bearer" }))
}

async fn values(
    State(recorded): State<Arc<Recorded>>,
    Path((_id, range)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    recorded.authorization.lock().unwrap().push(auth);

    match range.as_str() {
        "Forbidden" => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": { "code": 403, "status": "PERMISSION_DENIED" } })),
        )
            .into_response(),
        "Blank" => Json(json!({ "range": "Blank!A1:Z1000", "majorDimension": "ROWS" })).into_response(),
        _ => Json(json!({
            "range": "Sheet1!A1:Z1000",
            "majorDimension": "ROWS",
            "values": [["name", "points"], ["Alice", "12"]]
        }))
        .into_response(),
    }
}

async fn spawn_google() -> (SocketAddr, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let app = Router::new()
        .route("/token", post(token))
        .route("/v4/spreadsheets/:id/values/:range", get(values))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, recorded)
}

fn client_for(addr: SocketAddr) -> GoogleSheetsClient {
    let key = ServiceAccountKey {
        key_type: Some("service_account".to_string()),
        project_id: Some("test-project".to_string()),
        private_key_id: Some("test-key-id".to_string()),
        private_key: TEST_PRIVATE_KEY.to_string(),
        client_email: "ingest@test-project.iam.gserviceaccount.com".to_string(),
        client_id: None,
        auth_uri: None,
        token_uri: format!("http://{}/token", addr),
        auth_provider_x509_cert_url: None,
        client_x509_cert_url: None,
    };

    let http = GoogleSheetsClient::http_client().unwrap();
    let auth = ServiceAccountAuth::new(&key, http.clone()).unwrap();
    GoogleSheetsClient::new(http, auth).with_base_url(format!("http://{}/v4/spreadsheets", addr))
}

#[tokio::test]
async fn test_fetch_returns_grid_with_bearer_token() {
    let (addr, recorded) = spawn_google().await;
    let client = client_for(addr);

    let grid = client.fetch("1AbCdEf", "Sheet1").await.unwrap();
    assert_eq!(grid, vec![vec!["name", "points"], vec!["Alice", "12"]]);

    let auth = recorded.authorization.lock().unwrap().clone();
    assert_eq!(auth, vec![Some(format!("Bearer {}", TEST_TOKEN))]);
}

#[tokio::test]
async fn test_access_token_is_reused_across_fetches() {
    let (addr, recorded) = spawn_google().await;
    let client = client_for(addr);

    client.fetch("1AbCdEf", "Sheet1").await.unwrap();
    client.fetch("1AbCdEf", "Sheet1").await.unwrap();

    assert_eq!(recorded.token_requests.load(Ordering::SeqCst), 1);
    assert_eq!(recorded.authorization.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_error_status_maps_to_api_error() {
    let (addr, _recorded) = spawn_google().await;
    let client = client_for(addr);

    let result = client.fetch("1AbCdEf", "Forbidden").await;
    match result {
        Err(SheetsError::Api(status, body)) => {
            assert_eq!(status, 403);
            assert!(body.contains("PERMISSION_DENIED"));
        }
        other => panic!("expected Api(403, _), got {:?}", other),
    }
}

#[tokio::test]
async fn test_range_without_values_is_empty_grid() {
    let (addr, _recorded) = spawn_google().await;
    let client = client_for(addr);

    let grid = client.fetch("1AbCdEf", "Blank").await.unwrap();
    assert!(grid.is_empty());
}

#[tokio::test]
async fn test_token_endpoint_failure_is_auth_error() {
    let (addr, recorded) = spawn_google().await;
    let http = GoogleSheetsClient::http_client().unwrap();

    let mut key: ServiceAccountKey = serde_json::from_value(json!({
        "private_key": TEST_PRIVATE_KEY,
        "client_email": "ingest@test-project.iam.gserviceaccount.com"
    }))
    .unwrap();
    key.token_uri = format!("http://{}/no-such-token-endpoint", addr);

    let auth = ServiceAccountAuth::new(&key, http.clone()).unwrap();
    let client =
        GoogleSheetsClient::new(http, auth).with_base_url(format!("http://{}/v4/spreadsheets", addr));

    let result = client.fetch("1AbCdEf", "Sheet1").await;
    assert!(matches!(result, Err(SheetsError::Auth(_))));
    assert!(recorded.authorization.lock().unwrap().is_empty());
}
