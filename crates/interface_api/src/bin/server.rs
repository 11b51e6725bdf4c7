//! Judicial Calculation Core - API Server Binary
//!
//! This binary starts the HTTP API server for the restatement and tariff
//! engines.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin calc-api
//!
//! # Run with environment variables
//! CALC_HOST=127.0.0.1 CALC_PORT=9090 CALC_DEFAULT_REGION=TRF3 cargo run --bin calc-api
//! ```
//!
//! # Environment Variables
//!
//! * `CALC_HOST` - Server host (default: 0.0.0.0)
//! * `CALC_PORT` - Server port (default: 8080)
//! * `CALC_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `CALC_LOG_JSON` - Emit JSON log lines (default: false)
//! * `CALC_DEFAULT_DECIMALS` - Final rounding places when a request sets none (default: 2)
//! * `CALC_MAX_DAILY_SERIES_YEARS` - Daily SELIC span that triggers a warning (default: 10)
//! * `CALC_DEFAULT_REGION` - Region reported as default (default: CJF)
//!
//! `RUST_LOG` overrides `CALC_LOG_LEVEL`.

use std::net::SocketAddr;

use anyhow::Context;
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration in the environment is invalid
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid CALC_* configuration")?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        default_region = %config.default_region,
        "Starting Judicial Calculation API Server"
    );

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;
    let app = create_router(config);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `json` - Whether to emit JSON lines instead of human-readable output
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
