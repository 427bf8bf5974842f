//! Places API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum (request id, trace, timeout, body limit)
//!                          │
//!                          ▼
//!                     dispatch_handler ── malformed JSON ──▶ 400
//!                          │
//!                          ▼
//!                     routing::Router (first match wins)
//!                      │            │              │
//!                      ▼            ▼              ▼
//!                   nearby      trending       not_found (404)
//!
//!     AppState also carries the key-value store client for handlers.
//! ```
//!
//! The same app runs under the serverless adapter in `places-lambda`.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use places_api::lifecycle::{bootstrap, signals, Shutdown};

#[derive(Parser)]
#[command(name = "places-api")]
#[command(about = "Places API HTTP server", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "PLACES_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let server = bootstrap(cli.config.as_deref()).await?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::forward_signals(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
