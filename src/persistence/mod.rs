//! Persistence layer: PostgreSQL connectivity, schema bootstrap, accounts.
//!
//! Bootstrap runs on a single [`sqlx::PgConnection`]; runtime account
//! lookups go through a [`sqlx::PgPool`] built after bootstrap. Account
//! operations are generic over [`sqlx::PgExecutor`] so they accept either.

pub mod accounts;
pub mod bootstrap;
pub mod models;
pub mod postgres;
pub mod schema;

pub use bootstrap::{BootstrapReport, BootstrapStage, bootstrap};
