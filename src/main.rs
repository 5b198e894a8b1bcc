//! zanalytics server entry point.
//!
//! Bootstraps PostgreSQL, then starts the Axum HTTP server with the
//! ingestion, account, and live WebSocket endpoints.

use anyhow::Context;

use zanalytics::app_state::AppState;
use zanalytics::config::{ServiceConfig, resolve};
use zanalytics::error::BackendError;
use zanalytics::logging::init_tracing;
use zanalytics::persistence::bootstrap;
use zanalytics::persistence::postgres::{PoolSettings, lazy_pool};
use zanalytics::server::build_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env().context("loading configuration")?;
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting zanalytics");

    // Resolve and bootstrap the database; connection failures are fatal
    let url = resolve(config.postgres.as_ref()).context("resolving postgres url")?;
    let report = tokio::time::timeout(config.startup_timeout(), bootstrap(&url, &config.admin))
        .await
        .unwrap_or_else(|_| {
            Err(BackendError::Connection(
                "startup deadline exceeded".to_string(),
            ))
        })
        .context("bootstrapping postgres")?;

    if let Some(err) = &report.error {
        tracing::warn!(stage = %report.stage, error = %err, "continuing with partial bootstrap");
    }

    // Build application state
    let db = lazy_pool(&url, PoolSettings::from(&config)).context("building connection pool")?;
    let app = build_app(AppState { db });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "http endpoint: /v1/analytics");
    tracing::info!(addr = %config.listen_addr, "websocket endpoint: /v1/analytics/live");

    axum::serve(listener, app).await.context("serving http")?;

    Ok(())
}
