//! Server binary for the DevEvents service.
//!
//! Wires configuration, logging, the token service, the event repository,
//! and the HTTP API together, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `devevents-config.yaml` (or `DEVEVENTS_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the token service, failing fast on a bad secret
//! 4. Build the repository (`PostgreSQL` with migrations, or in-memory)
//! 5. Serve the API with graceful shutdown
//! 6. Close the database pool

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use devevents_api::AppState;
use devevents_auth::TokenService;
use devevents_core::{
    AppConfig, DatabaseConfig, EventService, LogFormat, LoggingConfig, StorageBackend,
};
use devevents_db::{EventRepository, InMemoryEventStore, PgEventStore, PostgresPool};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Config file read when `DEVEVENTS_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "devevents-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any startup step fails or the server stops
/// abnormally.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Load configuration. Logging is not up yet, so remember the source.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("devevents-server starting");
    match &source {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        host = %config.server.host,
        port = config.server.port,
        backend = ?config.database.backend,
        issuer = %config.auth.issuer,
        audience = %config.auth.audience,
        "Configuration resolved"
    );

    // 3. Build the token service.
    let tokens = TokenService::new(config.auth.token_config()?);
    info!("Token service ready");

    // 4. Build the repository.
    let (repository, pool) = build_repository(&config.database).await?;

    // 5. Serve.
    let state = Arc::new(AppState::new(EventService::new(repository), tokens));
    let served = devevents_api::start_server(&config.server, state).await;

    // 6. Release the pool even if serving failed.
    if let Some(pool) = pool {
        pool.close().await;
    }
    served?;

    info!("devevents-server stopped");
    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Load configuration from the YAML file, or defaults plus environment
/// overrides when it does not exist. Returns the path actually read.
fn load_config() -> Result<(AppConfig, Option<PathBuf>), ServerError> {
    let config_path = std::env::var("DEVEVENTS_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if config_path.exists() {
        let config = AppConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else {
        Ok((AppConfig::from_env()?, None))
    }
}

/// Build the configured repository. The pool is returned so it can be
/// closed on shutdown.
async fn build_repository(
    config: &DatabaseConfig,
) -> Result<(Arc<dyn EventRepository>, Option<PostgresPool>), ServerError> {
    match config.backend {
        StorageBackend::Postgres => {
            let pool = PostgresPool::open(config).await?;
            let store: Arc<dyn EventRepository> = Arc::new(PgEventStore::new(&pool));
            Ok((store, Some(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            let store: Arc<dyn EventRepository> = Arc::new(InMemoryEventStore::new());
            Ok((store, None))
        }
    }
}
