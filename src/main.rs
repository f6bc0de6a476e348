//! HTTP request ledger (v1)
//!
//! Serves a placeholder handler behind the capture middleware. Every request
//! is archived to the `requestlog` table of the configured store.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request ID ─▶ capture ─────────────▶ downstream handler
//!                                      │                          │
//!                                      │ spawn (not awaited)      │
//!                                      ▼                          ▼
//!                               ┌──────────────┐           Client Response
//!                               │  persister   │
//!                               │  INSERT INTO │
//!                               │  requestlog  │
//!                               └──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use request_ledger::config::load_config;
use request_ledger::http::{default_app, HttpServer};
use request_ledger::lifecycle::{bootstrap, wait_for_signal, Shutdown, StartupError};
use request_ledger::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "request-ledger")]
#[command(about = "Archive every HTTP request to a relational store", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. DATABASE_URL overrides database.url.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).map_err(StartupError::from)?;

    logging::init_logging(&config.observability);
    tracing::info!("request-ledger v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.database.max_connections,
        excluded_headers = ?config.capture.excluded_headers,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // No traffic without a reachable store and an existing table.
    let persister = match bootstrap(&config).await {
        Ok(persister) => persister,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, persister, default_app());
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
