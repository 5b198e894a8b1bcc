//! PostgreSQL connection management.
//!
//! [`connect`] and [`ping`] serve the bootstrap sequence on a single
//! connection. [`lazy_pool`] builds the pool used for runtime requests.
//! None of these retry; the caller owns retry and deadline policy.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};

use crate::config::ServiceConfig;
use crate::error::BackendError;

/// Sizing and timeout settings for the runtime pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// Idle connections kept open.
    pub min_connections: u32,
    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
}

impl From<&ServiceConfig> for PoolSettings {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            max_connections: config.database_max_connections.max(1),
            min_connections: config
                .database_min_connections
                .min(config.database_max_connections),
            acquire_timeout: Duration::from_secs(config.database_connect_timeout_secs),
        }
    }
}

/// Opens a single connection to the server at `url`.
///
/// # Errors
///
/// Returns [`BackendError::Connection`] on any network, authentication,
/// or protocol failure, including an unparsable URL.
pub async fn connect(url: &str) -> Result<PgConnection, BackendError> {
    PgConnection::connect(url)
        .await
        .map_err(|e| BackendError::Connection(e.to_string()))
}

/// Round-trips a no-op to the server to confirm the connection is live.
///
/// # Errors
///
/// Returns [`BackendError::Connection`] if the server is unreachable or the
/// connection was already closed.
pub async fn ping(conn: &mut PgConnection) -> Result<(), BackendError> {
    conn.ping()
        .await
        .map_err(|e| BackendError::Connection(e.to_string()))
}

/// Builds a pool that opens connections on first use.
///
/// # Errors
///
/// Returns [`BackendError::Configuration`] if `url` cannot be parsed.
pub fn lazy_pool(url: &str, settings: PoolSettings) -> Result<PgPool, BackendError> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_lazy(url)
        .map_err(|e| BackendError::Configuration(format!("invalid postgres url: {e}")))
}
