//! HTTP API for the GPIO status dashboard.
//!
//! The dashboard polls `/api/command` (or `/api/status`) on demand; every
//! request builds a fresh report.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{Result, StatusError};
use crate::status::StatusAggregator;
use std::net::SocketAddr;
use tracing::info;

/// Start the web server and run until Ctrl-C.
pub async fn start_web_server(config: WebConfig, aggregator: StatusAggregator) -> Result<()> {
    let app = create_app(aggregator, &config);

    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| StatusError::config_error(format!("Invalid bind address: {}", e)))?;

    info!("Starting GPIO status server on http://{}", addr);
    info!("API endpoint: http://{}/api/command", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StatusError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StatusError::web_server_error(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler: run until the process is killed
        std::future::pending::<()>().await;
    }
}
