//! Account creation and authentication against the `accounts` table.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use sqlx::PgExecutor;

use super::models::Account;
use crate::credentials::{hash_password, verify_password};
use crate::error::BackendError;

/// Hash checked when the email is unknown, so both rejection paths pay
/// for one Argon2 verification.
static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Creates an account unless one with the same email already exists.
///
/// Returns `true` when a row was inserted and `false` when the email was
/// already taken. An existing row's hash is never overwritten.
///
/// # Errors
///
/// Returns [`BackendError::Hashing`] if the password cannot be hashed and
/// [`BackendError::Storage`] if the insert fails.
pub async fn create_account<'e, E>(
    executor: E,
    email: &str,
    plaintext_password: &str,
) -> Result<bool, BackendError>
where
    E: PgExecutor<'e>,
{
    let hash = hash_password(plaintext_password)?;
    insert_if_absent(executor, email, &hash).await
}

/// Inserts an already-hashed account with `ON CONFLICT (email) DO NOTHING`.
///
/// # Errors
///
/// Returns [`BackendError::Storage`] on database failure.
pub(crate) async fn insert_if_absent<'e, E>(
    executor: E,
    email: &str,
    password_hash: &str,
) -> Result<bool, BackendError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        "INSERT INTO accounts (email, password) VALUES ($1, $2) ON CONFLICT (email) DO NOTHING",
    )
    .bind(email)
    .bind(password_hash)
    .execute(executor)
    .await
    .map_err(|e| BackendError::Storage(e.to_string()))?;

    let created = result.rows_affected() > 0;
    tracing::debug!(email, created, "account insert");
    Ok(created)
}

/// Checks `plaintext_password` against the stored hash for `email`.
///
/// Unknown email, wrong password, and storage failure all return `false`;
/// storage failures are logged.
pub async fn authenticate<'e, E>(executor: E, email: &str, plaintext_password: &str) -> bool
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_scalar::<_, String>("SELECT password FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await;

    match stored {
        Ok(Some(hash)) => verify_password(plaintext_password, &hash),
        Ok(None) => {
            if let Some(decoy) = DECOY_HASH.get_or_init(|| hash_password("decoy").ok()) {
                let _ = verify_password(plaintext_password, decoy);
            }
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, "account lookup failed");
            false
        }
    }
}

/// Loads the account row for `email`, if any.
///
/// # Errors
///
/// Returns [`BackendError::Storage`] on database failure.
pub async fn find_account<'e, E>(executor: E, email: &str) -> Result<Option<Account>, BackendError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, (i32, String, String, Option<NaiveDateTime>, Option<NaiveDateTime>)>(
        "SELECT id, email, password, timestamp, updated_at FROM accounts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(executor)
    .await
    .map_err(|e| BackendError::Storage(e.to_string()))?;

    Ok(row.map(
        |(id, email, password_hash, created_at, updated_at)| Account {
            id,
            email,
            password_hash,
            created_at,
            updated_at,
        },
    ))
}
