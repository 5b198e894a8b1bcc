//! Shared application state injected into all Axum handlers.

use sqlx::PgPool;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Runtime connection pool for account lookups.
    pub db: PgPool,
}
