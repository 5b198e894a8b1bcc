//! # zanalytics
//!
//! Analytics ingestion service: an HTTP endpoint accepts JSON events, a
//! WebSocket endpoint echoes live data, and a PostgreSQL backend stores
//! accounts and events.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Echo (ws/)
//!     │
//!     ├── Account Store (persistence/accounts)
//!     ├── Credential Hasher (credentials)
//!     │
//!     └── PostgreSQL
//!           ▲
//!           └── Bootstrap at startup (config → persistence/bootstrap)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod server;
pub mod ws;
