//! Idempotent schema creation and admin account seeding.

use sqlx::PgConnection;

use super::accounts;
use crate::credentials::hash_password;
use crate::error::{BackendError, TableFailure};

const EVENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS events (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    timestamp TIMESTAMP DEFAULT now()
)";

const ACCOUNTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS accounts (
    id SERIAL PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    updated_at TIMESTAMP DEFAULT now(),
    timestamp TIMESTAMP DEFAULT now()
)";

/// Tables created by [`ensure_schema`], in creation order.
pub const TABLES: [(&str, &str); 2] = [("events", EVENTS_TABLE), ("accounts", ACCOUNTS_TABLE)];

/// Creates every table in [`TABLES`] that does not exist yet.
///
/// A failing statement is logged and does not stop the remaining ones.
///
/// # Errors
///
/// Returns [`BackendError::Schema`] listing every table that failed.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<(), BackendError> {
    let mut failures = Vec::new();

    for (table, ddl) in TABLES {
        match sqlx::query(ddl).execute(&mut *conn).await {
            Ok(_) => tracing::info!(table, "table created or already exists"),
            Err(e) => {
                tracing::warn!(table, error = %e, "table creation failed");
                failures.push(TableFailure {
                    table,
                    message: e.to_string(),
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(BackendError::Schema(failures))
    }
}

/// Seeds the admin account if it is not already present.
///
/// Does nothing when either `username` or `password` is empty.
///
/// # Errors
///
/// Returns [`BackendError::Hashing`] or [`BackendError::Storage`] from the
/// hash and insert steps.
pub async fn ensure_admin_account(
    conn: &mut PgConnection,
    username: &str,
    password: &str,
) -> Result<(), BackendError> {
    if username.is_empty() || password.is_empty() {
        tracing::info!("admin credentials not configured, skipping seed");
        return Ok(());
    }

    let hash = hash_password(password)?;
    let created = accounts::insert_if_absent(&mut *conn, username, &hash).await?;
    if created {
        tracing::info!(email = username, "admin account created");
    } else {
        tracing::info!(email = username, "admin account already exists");
    }
    Ok(())
}
