//! WebSocket layer for live analytics.
//!
//! The endpoint at `/v1/analytics/live` echoes every data frame back to
//! the sender.

pub mod connection;
pub mod handler;
