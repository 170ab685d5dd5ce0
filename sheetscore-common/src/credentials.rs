//! Google service-account credential bundle
//!
//! The bundle comes either from a JSON key file (as downloaded from the Google
//! Cloud console) or from individual `GOOGLE_*` environment variables.
//! A key file, when configured, always wins.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Google's OAuth 2.0 token endpoint
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Service-account key, field-for-field the layout of a Google JSON key file
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// PEM-encoded RSA private key
    pub private_key: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub auth_uri: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub auth_provider_x509_cert_url: Option<String>,
    #[serde(default)]
    pub client_x509_cert_url: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

// Keeps the private key out of logs
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// Where the credential bundle was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    File(PathBuf),
    Environment,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::File(path) => write!(f, "key file {}", path.display()),
            CredentialSource::Environment => write!(f, "GOOGLE_* environment variables"),
        }
    }
}

/// Parse a JSON key file
pub fn load_key_file(path: &Path) -> Result<ServiceAccountKey> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Read credentials file {} failed: {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Parse credentials file {} failed: {}", path.display(), e))
    })
}

/// Build the bundle from `GOOGLE_*` variables via `lookup`
///
/// `lookup` is `std::env::var(..).ok()` in production; tests pass a map.
/// Escaped `\n` sequences in `GOOGLE_PRIVATE_KEY` become real newlines.
pub fn key_from_lookup<F>(lookup: F) -> Result<ServiceAccountKey>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let private_key = non_empty("GOOGLE_PRIVATE_KEY")
        .ok_or_else(|| Error::Config("GOOGLE_PRIVATE_KEY is not set".to_string()))?
        .replace("\\n", "\n");
    let client_email = non_empty("GOOGLE_CLIENT_EMAIL")
        .ok_or_else(|| Error::Config("GOOGLE_CLIENT_EMAIL is not set".to_string()))?;

    Ok(ServiceAccountKey {
        key_type: non_empty("GOOGLE_TYPE"),
        project_id: non_empty("GOOGLE_PROJECT_ID"),
        private_key_id: non_empty("GOOGLE_PRIVATE_KEY_ID"),
        private_key,
        client_email,
        client_id: non_empty("GOOGLE_CLIENT_ID"),
        auth_uri: non_empty("GOOGLE_AUTH_URI"),
        token_uri: non_empty("GOOGLE_TOKEN_URI").unwrap_or_else(default_token_uri),
        auth_provider_x509_cert_url: non_empty("GOOGLE_AUTH_PROVIDER_CERT_URL"),
        client_x509_cert_url: non_empty("GOOGLE_CLIENT_CERT_URL"),
    })
}

/// Resolve the credential bundle: key file if configured, else environment
pub fn resolve_credentials(
    credentials_file: Option<&Path>,
) -> Result<(ServiceAccountKey, CredentialSource)> {
    if let Some(path) = credentials_file {
        let key = load_key_file(path)?;
        info!("Google credentials loaded from {}", path.display());
        return Ok((key, CredentialSource::File(path.to_path_buf())));
    }

    let key = key_from_lookup(|name| std::env::var(name).ok()).map_err(|e| {
        Error::Config(format!(
            "Google credentials not configured ({}). Provide one of:\n\
             1. --credentials-file / GOOGLE_APPLICATION_CREDENTIALS pointing at a JSON key file\n\
             2. GOOGLE_CLIENT_EMAIL and GOOGLE_PRIVATE_KEY (plus the other GOOGLE_* fields)",
            e
        ))
    })?;
    info!("Google credentials loaded from environment");
    Ok((key, CredentialSource::Environment))
}
