//! # Instance Info Server
//!
//! Thin wrapper binary for running the info server standalone.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin instance-info-server
//!
//! # Run on a specific address
//! INFO_SERVER_BIND_ADDRESS=127.0.0.1:9090 cargo run --bin instance-info-server
//! ```

use anyhow::Context;
use tokio::signal;
use tracing::info;

use instance_info::logging;
use instance_info::web;
use instance_info::web::state::AppState;
use instance_info::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first
    logging::init_structured_logging();

    info!("🚀 Starting Instance Info Server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));
    info!("   Environment: {}", logging::detect_environment());

    let config = ServerConfig::from_env().context("failed to load configuration")?;
    info!(
        bind_address = %config.bind_address,
        metadata_endpoint = %config.metadata.base_url,
        request_timeout_ms = config.request_timeout_ms,
        "Configuration loaded"
    );

    let bind_address = config.bind_address.clone();
    let state = AppState::from_config(config).context("failed to build application state")?;
    let app = web::create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    info!(bind_address = %bind_address, "Server listening; press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
