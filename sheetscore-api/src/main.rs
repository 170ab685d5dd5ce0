//! sheetscore-api - Google Sheet student score importer
//!
//! Reads student scoring rows from a Google Sheet, stores the valid ones in
//! SQLite, and serves them back as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use sheetscore_api::db::SqliteStudentStore;
use sheetscore_api::sheets::{GoogleSheetsClient, ServiceAccountAuth};
use sheetscore_api::{build_info, build_router, AppState};
use sheetscore_common::config::{load_toml_config, ConfigOverrides, ServiceConfig};
use sheetscore_common::credentials::resolve_credentials;
use sheetscore_common::db::init_database;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for sheetscore-api
#[derive(Parser, Debug)]
#[command(name = "sheetscore-api")]
#[command(about = "Imports student scores from Google Sheets and serves them over HTTP")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(long, env = "SHEETSCORE_BIND")]
    bind: Option<String>,

    /// SQLite database file
    #[arg(short, long, env = "SHEETSCORE_DATABASE")]
    database: Option<PathBuf>,

    /// Google service-account JSON key file
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "SHEETSCORE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // TOML is read before tracing starts so its log level can seed the filter
    let toml_config = args
        .config
        .as_deref()
        .map(load_toml_config)
        .transpose()
        .context("Failed to load configuration file")?;

    let config = ServiceConfig::resolve(
        ConfigOverrides {
            port: args.port,
            bind: args.bind,
            database_path: args.database,
            credentials_file: args.credentials_file,
        },
        toml_config,
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting sheetscore-api v{} [{}] built {} ({})",
        build_info::VERSION,
        build_info::REVISION,
        build_info::BUILT_AT,
        build_info::PROFILE
    );

    let (key, source) = resolve_credentials(config.credentials_file.as_deref())
        .context("Failed to load Google credentials")?;
    info!("Google credentials source: {}", source);

    let http_client = GoogleSheetsClient::http_client().context("Failed to build HTTP client")?;
    let auth = ServiceAccountAuth::new(&key, http_client.clone())
        .context("Failed to initialize service account authentication")?;
    info!("Service account: {}", auth.client_email());
    let fetcher = GoogleSheetsClient::new(http_client, auth);

    info!("Database path: {}", config.database_path.display());
    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;
    info!("✓ Connected to database");

    let state = AppState::new(Arc::new(fetcher), Arc::new(SqliteStudentStore::new(pool.clone())));
    let app = build_router(state);

    let addr = config.socket_addr().context("Invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("sheetscore-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
