//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, threat checker setup, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::threat_checker::ThreatChecker;
use crate::infrastructure::safe_browsing::SafeBrowsingChecker;
use crate::infrastructure::store;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Builds the threat checker described by `config`.
///
/// # Errors
///
/// Returns an error if `SAFE_BROWSING_URL` does not parse.
pub fn build_checker(config: &Config) -> Result<Arc<dyn ThreatChecker>> {
    let checker = SafeBrowsingChecker::new(
        config.safe_browsing_api_key.clone(),
        &config.safe_browsing_url,
        Duration::from_secs(config.safe_browsing_timeout_secs),
    )
    .context("Invalid SAFE_BROWSING_URL")?;

    Ok(Arc::new(checker))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (memory, Redis or PostgreSQL, with migrations)
/// - Safe Browsing checker
/// - Link registrar
/// - Axum HTTP server
///
/// Stops accepting connections on Ctrl-C or SIGTERM and drains in-flight
/// requests before returning.
///
/// # Errors
///
/// Returns an error if:
/// - Store connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = store::connect(&config).await?;

    let checker = build_checker(&config)?;

    let state = AppState::new(store, checker, config.threat_check_policy);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl-C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
