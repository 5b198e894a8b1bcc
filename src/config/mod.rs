//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Backend connection parameters are
//! resolved into a URL by [`backend::resolve`].

pub mod backend;

use std::net::SocketAddr;
use std::time::Duration;

pub use backend::{BackendConfig, resolve};

use crate::error::BackendError;

/// Variables that make up the Postgres backend section.
const POSTGRES_KEYS: [&str; 5] = [
    "POSTGRES_URL",
    "POSTGRES_HOST",
    "POSTGRES_PORT",
    "POSTGRES_USER",
    "POSTGRES_PASSWORD",
];

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Identity seeded into the `accounts` table at startup.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AdminCredentials {
    /// Account email (login name).
    pub username: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`ServiceConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address for the HTTP and WebSocket listener.
    pub listen_addr: SocketAddr,

    /// Postgres backend section; `None` when no `POSTGRES_*` variable is set.
    pub postgres: Option<BackendConfig>,

    /// Account seeded at bootstrap.
    pub admin: AdminCredentials,

    /// Maximum number of connections in the runtime pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the runtime pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a pooled connection.
    pub database_connect_timeout_secs: u64,

    /// Deadline in seconds for the whole bootstrap sequence.
    pub startup_timeout_secs: u64,

    /// Log line format.
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Configuration`] if `LISTEN_ADDR` is set but
    /// cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, BackendError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Configuration`] if `LISTEN_ADDR` is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BackendError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:9000".to_string())
            .parse()
            .map_err(|e| BackendError::Configuration(format!("invalid LISTEN_ADDR: {e}")))?;

        let postgres = POSTGRES_KEYS
            .iter()
            .any(|key| lookup(key).is_some())
            .then(|| BackendConfig {
                host: lookup("POSTGRES_HOST").unwrap_or_default(),
                port: parse_var(&lookup, "POSTGRES_PORT", 0),
                username: lookup("POSTGRES_USER").unwrap_or_default(),
                password: lookup("POSTGRES_PASSWORD").unwrap_or_default(),
                url: lookup("POSTGRES_URL"),
            });

        let admin = AdminCredentials {
            username: lookup("ADMIN_USERNAME").unwrap_or_default(),
            password: lookup("ADMIN_PASSWORD").unwrap_or_default(),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json" | "JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            postgres,
            admin,
            database_max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            database_min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS", 1),
            database_connect_timeout_secs: parse_var(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", 5),
            startup_timeout_secs: parse_var(&lookup, "STARTUP_TIMEOUT_SECS", 30),
            log_format,
        })
    }

    /// Overall bootstrap deadline.
    #[must_use]
    pub const fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
