//! Database models.

use chrono::NaiveDateTime;
use serde::Serialize;

/// A stored row from the `accounts` table.
///
/// Timestamps are server-assigned on insert. The columns are nullable in
/// the schema, hence the `Option`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Auto-increment row ID.
    pub id: i32,
    /// Unique login email.
    pub email: String,
    /// PHC-format password hash. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    /// Row creation time (`timestamp` column).
    pub created_at: Option<NaiveDateTime>,
    /// Last update time.
    pub updated_at: Option<NaiveDateTime>,
}
