//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;

/// Read buffer size for live connections, in bytes.
const READ_BUFFER_SIZE: usize = 1024;

/// Write buffer size for live connections, in bytes.
const WRITE_BUFFER_SIZE: usize = 1024;

/// `GET /v1/analytics/live` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.read_buffer_size(READ_BUFFER_SIZE)
        .write_buffer_size(WRITE_BUFFER_SIZE)
        .on_failed_upgrade(|e| tracing::warn!(error = %e, "live analytics upgrade failed"))
        .on_upgrade(run_connection)
}
