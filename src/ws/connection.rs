//! Read/write loop for a single live connection.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

/// Echoes text and binary frames until the client closes or an I/O error
/// occurs.
pub async fn run_connection(socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    tracing::debug!("ws connection opened");

    while let Some(msg) = ws_rx.next().await {
        let reply = match msg {
            Ok(frame @ (Message::Text(_) | Message::Binary(_))) => frame,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(error = %e, "ws read failed");
                break;
            }
        };
        if let Err(e) = ws_tx.send(reply).await {
            tracing::debug!(error = %e, "ws write failed");
            break;
        }
    }

    tracing::debug!("ws connection closed");
}
