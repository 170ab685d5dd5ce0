//! Configuration loading for the sheetscore service
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Steps 1 and 2 are merged by the binary's argument parser and arrive here as
//! [`ConfigOverrides`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address (all interfaces)
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "./sheetscore.db";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; anything left out falls through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Address the HTTP server binds to
    #[serde(default)]
    pub bind: Option<String>,

    /// Path to SQLite database file (relative or absolute)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Path to a Google service-account JSON key file
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load TOML configuration from an explicit path
///
/// The file was named by the operator, so a missing or malformed file is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded configuration file: {}", path.display());
    Ok(config)
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub database_path: Option<PathBuf>,
    pub credentials_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub bind: String,
    pub database_path: PathBuf,
    /// `None` means credentials come from the `GOOGLE_*` environment variables
    pub credentials_file: Option<PathBuf>,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge overrides, optional TOML config and compiled defaults
    pub fn resolve(overrides: ConfigOverrides, toml_config: Option<TomlConfig>) -> Self {
        let toml_config = toml_config.unwrap_or_default();

        if overrides.port.is_some() && toml_config.port.is_some() {
            warn!("Port set on command line/environment and in TOML; using command line/environment");
        }

        Self {
            port: overrides.port.or(toml_config.port).unwrap_or(DEFAULT_PORT),
            bind: overrides
                .bind
                .or(toml_config.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            database_path: overrides
                .database_path
                .or(toml_config.database_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            credentials_file: overrides.credentials_file.or(toml_config.credentials_file),
            log_level: toml_config.logging.level,
        }
    }

    /// Socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", self.bind, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = ServiceConfig::resolve(ConfigOverrides::default(), None);

        assert_eq!(config.port, 5000);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.database_path, PathBuf::from("./sheetscore.db"));
        assert!(config.credentials_file.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides_beat_toml() {
        let overrides = ConfigOverrides {
            port: Some(8080),
            ..Default::default()
        };
        let toml_config = TomlConfig {
            port: Some(9090),
            database_path: Some(PathBuf::from("/var/lib/sheetscore/data.db")),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(overrides, Some(toml_config));

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("/var/lib/sheetscore/data.db"));
    }

    #[test]
    fn test_socket_addr_rejects_garbage_bind() {
        let config = ServiceConfig {
            bind: "not-an-ip".to_string(),
            ..ServiceConfig::resolve(ConfigOverrides::default(), None)
        };

        assert!(matches!(config.socket_addr(), Err(Error::Config(_))));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServiceConfig::resolve(
            ConfigOverrides {
                bind: Some("127.0.0.1".to_string()),
                port: Some(5725),
                ..Default::default()
            },
            None,
        );

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:5725");
    }
}
