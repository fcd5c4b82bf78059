//! HTTP server initialization and runtime setup.
//!
//! Handles click log setup and the Axum server lifecycle for the collector.

use crate::config::Config;
use crate::infrastructure::persistence::FileClickLog;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the collector with the given configuration.
///
/// Initializes:
/// - File-backed click log
/// - Axum HTTP server with graceful shutdown on ctrl-c
///
/// # Errors
///
/// Returns an error if:
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let click_log = Arc::new(FileClickLog::new(&config.log_file));
    tracing::info!("Click log: {}", config.log_file.display());

    let state = AppState::new(click_log);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down"),
        Err(e) => {
            tracing::warn!("Failed to install ctrl-c handler: {e}");
            // resolving here would shut the server down immediately
            std::future::pending::<()>().await;
        }
    }
}
