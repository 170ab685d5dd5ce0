//! Service-account OAuth 2.0 (JWT bearer grant)
//!
//! Signs an RS256 assertion with the service account's private key, exchanges
//! it at the token endpoint, and caches the access token until shortly before
//! it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sheetscore_common::credentials::ServiceAccountKey;
use tokio::sync::Mutex;

use super::SheetsError;

/// Read-only spreadsheet scope
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Access-token source for a single service account
pub struct ServiceAccountAuth {
    client_email: String,
    token_uri: String,
    key_id: Option<String>,
    encoding_key: EncodingKey,
    http_client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// Parses the PEM key up front so a bad key fails at startup
    pub fn new(key: &ServiceAccountKey, http_client: reqwest::Client) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::Auth(format!("Invalid service account private key: {}", e)))?;

        Ok(Self {
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            key_id: key.private_key_id.clone(),
            encoding_key,
            http_client,
            cached: Mutex::new(None),
        })
    }

    /// Service account identity, for logging
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    fn build_assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.client_email,
            scope: SHEETS_READONLY_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SheetsError::Auth(format!("Failed to sign assertion: {}", e)))
    }

    /// Current access token, exchanging a fresh assertion when needed
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.build_assertion(now)?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        tracing::debug!(client_email = %self.client_email, "Requesting Google access token");

        let response = self
            .http_client
            .post(&self.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SheetsError::Auth(format!(
                "Token endpoint returned {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;

        let fresh = CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        };
        let value = fresh.value.clone();
        *cached = Some(fresh);

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_with_pem(pem: &str) -> ServiceAccountKey {
        ServiceAccountKey {
            key_type: Some("service_account".to_string()),
            project_id: None,
            private_key_id: None,
            private_key: pem.to_string(),
            client_email: "ingest@example.iam.gserviceaccount.com".to_string(),
            client_id: None,
            auth_uri: None,
            token_uri: sheetscore_common::credentials::DEFAULT_TOKEN_URI.to_string(),
            auth_provider_x509_cert_url: None,
            client_x509_cert_url: None,
        }
    }

    #[test]
    fn test_garbage_private_key_rejected() {
        let result = ServiceAccountAuth::new(&key_with_pem("not a pem"), reqwest::Client::new());
        assert!(matches!(result, Err(SheetsError::Auth(_))));
    }

    #[test]
    fn test_cached_token_freshness() {
        let now = Utc::now();
        let token = CachedToken {
            value: "ya29.token".to_string(),
            expires_at: now + Duration::seconds(3599),
        };
        assert!(token.is_fresh(now));

        // Inside the refresh margin counts as stale
        let expiring = CachedToken {
            value: "ya29.token".to_string(),
            expires_at: now + Duration::seconds(30),
        };
        assert!(!expiring.is_fresh(now));
    }
}
