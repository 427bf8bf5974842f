//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and (optionally) the metrics exporter
//! - Build the store client and the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Shared by the standalone server and the serverless entry point

use std::net::{AddrParseError, SocketAddr};
use std::path::Path;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

use crate::config::{self, ConfigError};
use crate::http::HttpServer;
use crate::observability::{logging, metrics};
use crate::routing::PatternError;
use crate::store::{self, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("logging: {0}")]
    Logging(#[from] TryInitError),

    #[error("metrics address: {0}")]
    MetricsAddress(#[from] AddrParseError),

    #[error("metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("route table: {0}")]
    Routes(#[from] PatternError),
}

/// Load config from `config_path` (plus environment) and assemble the server.
pub async fn bootstrap(config_path: Option<&Path>) -> Result<HttpServer, StartupError> {
    let config = config::load(config_path)?;

    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?config_path,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        store_table = %config.store.table,
        offline = config.store.offline,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let store = store::connect(&config.store).await?;

    Ok(HttpServer::new(config, store)?)
}
