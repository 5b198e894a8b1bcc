//! Per-backend connection parameters and URL resolution.

use std::fmt;

use crate::error::BackendError;

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Port used when the configured one is zero or negative.
pub const DEFAULT_PORT: u16 = 5432;

/// Database name appended to every assembled URL.
pub const DATABASE_NAME: &str = "zanalytics";

/// Connection parameters for one backend, as loaded at startup.
///
/// `port` is signed because the raw value may be zero or negative, both of
/// which mean "use the default".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    /// Server host name. Blank means [`DEFAULT_HOST`].
    pub host: String,
    /// Server port. Zero or negative means [`DEFAULT_PORT`].
    pub port: i32,
    /// Login role.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Precomputed connection string; used verbatim when non-empty.
    pub url: Option<String>,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Turns a possibly partial backend configuration into one connection URL.
///
/// A non-blank `url` wins and is returned unmodified. Otherwise the URL is
/// assembled as `postgres://{username}:{password}@{host}:{port}/zanalytics`
/// after defaulting host and port. The input is never modified.
///
/// # Errors
///
/// Returns [`BackendError::Configuration`] when `config` is `None`, when
/// either credential is empty, or when the port exceeds `u16::MAX`.
pub fn resolve(config: Option<&BackendConfig>) -> Result<String, BackendError> {
    let Some(config) = config else {
        return Err(BackendError::Configuration(
            "no configuration provided".to_string(),
        ));
    };

    if let Some(url) = config.url.as_deref()
        && !url.trim().is_empty()
    {
        return Ok(url.to_string());
    }

    let host = if config.host.trim().is_empty() {
        tracing::info!(fallback = DEFAULT_HOST, "no postgres host provided");
        DEFAULT_HOST
    } else {
        config.host.trim()
    };

    let port = if config.port <= 0 {
        tracing::info!(fallback = DEFAULT_PORT, "no postgres port provided");
        DEFAULT_PORT
    } else {
        u16::try_from(config.port).map_err(|_| {
            BackendError::Configuration(format!("port {} out of range", config.port))
        })?
    };

    if config.username.is_empty() || config.password.is_empty() {
        return Err(BackendError::Configuration(
            "missing credentials".to_string(),
        ));
    }

    Ok(format!(
        "postgres://{}:{}@{host}:{port}/{DATABASE_NAME}",
        config.username, config.password
    ))
}
