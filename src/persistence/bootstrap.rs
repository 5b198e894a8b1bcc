//! Startup sequence: connect, verify, create schema, seed the admin.
//!
//! The stages advance strictly in order:
//!
//! ```text
//! Unconnected → Connected → SchemaEnsured → AdminEnsured
//! ```
//!
//! Failing to reach `Connected` is returned as an error. Failures in the
//! later stages are recorded in the [`BootstrapReport`] and the sequence
//! stops there, but the caller may keep serving traffic.

use std::fmt;

use sqlx::{Connection, PgConnection};

use super::{postgres, schema};
use crate::config::AdminCredentials;
use crate::error::BackendError;

/// Progress marker for the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BootstrapStage {
    /// No live connection yet.
    Unconnected,
    /// Connection opened and pinged.
    Connected,
    /// All tables exist.
    SchemaEnsured,
    /// Admin account exists or seeding was explicitly skipped.
    AdminEnsured,
}

impl BootstrapStage {
    /// Returns the snake-case name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconnected => "unconnected",
            Self::Connected => "connected",
            Self::SchemaEnsured => "schema_ensured",
            Self::AdminEnsured => "admin_ensured",
        }
    }
}

impl fmt::Display for BootstrapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a bootstrap run that got at least as far as `Connected`.
#[derive(Debug)]
pub struct BootstrapReport {
    /// Last stage reached.
    pub stage: BootstrapStage,
    /// Error that stopped the sequence after `Connected`, if any.
    pub error: Option<BackendError>,
}

impl BootstrapReport {
    /// Report for a freshly verified connection.
    #[must_use]
    pub const fn connected() -> Self {
        Self {
            stage: BootstrapStage::Connected,
            error: None,
        }
    }

    /// Returns `true` if every stage succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.stage, BootstrapStage::AdminEnsured)
    }

    /// Applies the result of the step that leads out of the current stage.
    ///
    /// Once a step has failed, further results are ignored.
    pub fn record(&mut self, result: Result<(), BackendError>) {
        if self.error.is_some() {
            return;
        }
        let next = match self.stage {
            BootstrapStage::Unconnected => BootstrapStage::Connected,
            BootstrapStage::Connected => BootstrapStage::SchemaEnsured,
            BootstrapStage::SchemaEnsured | BootstrapStage::AdminEnsured => {
                BootstrapStage::AdminEnsured
            }
        };
        match result {
            Ok(()) => self.stage = next,
            Err(e) => {
                tracing::warn!(stage = %self.stage, error = %e, "bootstrap step failed");
                self.error = Some(e);
            }
        }
    }

    /// Returns `true` while later steps may still run.
    #[must_use]
    pub const fn can_continue(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs the full bootstrap sequence against `url` on a single connection.
///
/// The connection is closed before returning.
///
/// # Errors
///
/// Returns [`BackendError::Connection`] if the connection cannot be opened
/// or does not answer a ping. Schema and seeding failures are reported in
/// the returned [`BootstrapReport`] instead.
pub async fn bootstrap(
    url: &str,
    admin: &AdminCredentials,
) -> Result<BootstrapReport, BackendError> {
    let mut conn = postgres::connect(url).await?;
    postgres::ping(&mut conn).await?;
    tracing::info!(stage = %BootstrapStage::Connected, "postgres reachable");

    let report = run_stages(&mut conn, admin).await;

    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "closing bootstrap connection failed");
    }
    Ok(report)
}

async fn run_stages(conn: &mut PgConnection, admin: &AdminCredentials) -> BootstrapReport {
    let mut report = BootstrapReport::connected();

    report.record(schema::ensure_schema(conn).await);
    if report.can_continue() {
        report.record(schema::ensure_admin_account(conn, &admin.username, &admin.password).await);
    }

    tracing::info!(stage = %report.stage, complete = report.is_complete(), "bootstrap finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(BootstrapStage::Unconnected < BootstrapStage::Connected);
        assert!(BootstrapStage::Connected < BootstrapStage::SchemaEnsured);
        assert!(BootstrapStage::SchemaEnsured < BootstrapStage::AdminEnsured);
    }

    #[test]
    fn successful_steps_reach_admin_ensured() {
        let mut report = BootstrapReport::connected();
        report.record(Ok(()));
        assert_eq!(report.stage, BootstrapStage::SchemaEnsured);
        report.record(Ok(()));
        assert_eq!(report.stage, BootstrapStage::AdminEnsured);
        assert!(report.is_complete());
    }

    #[test]
    fn schema_failure_stops_before_admin() {
        let mut report = BootstrapReport::connected();
        report.record(Err(BackendError::Schema(Vec::new())));
        assert_eq!(report.stage, BootstrapStage::Connected);
        assert!(!report.can_continue());

        report.record(Ok(()));
        assert_eq!(report.stage, BootstrapStage::Connected);
        assert!(matches!(report.error, Some(BackendError::Schema(_))));
    }

    #[test]
    fn admin_failure_is_recorded_not_raised() {
        let mut report = BootstrapReport::connected();
        report.record(Ok(()));
        report.record(Err(BackendError::Hashing("bad params".to_string())));
        assert_eq!(report.stage, BootstrapStage::SchemaEnsured);
        assert!(!report.is_complete());
        assert!(matches!(report.error, Some(BackendError::Hashing(_))));
    }

    #[test]
    fn stage_names() {
        assert_eq!(BootstrapStage::SchemaEnsured.to_string(), "schema_ensured");
        assert_eq!(BootstrapStage::Unconnected.as_str(), "unconnected");
    }

    #[tokio::test]
    async fn unreachable_server_fails_before_connected() {
        let result = bootstrap(
            "postgres://u:p@127.0.0.1:1/zanalytics",
            &AdminCredentials::default(),
        )
        .await;
        assert!(matches!(result, Err(BackendError::Connection(_))));
    }
}
