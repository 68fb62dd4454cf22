//! WebSocket Connection Handler
//!
//! Drives one socket: a writer task drains the connection's outbound queue
//! while the read loop dispatches each inbound `chat message` as its own task.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use uuid::Uuid;

use super::messages::SocketEvent;
use super::relay::Relay;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.max_message_size(state.settings.websocket.max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, state.relay))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, relay: Arc<Relay>) {
    // Split socket for concurrent read/write
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<SocketEvent>();

    let session_id = relay.register_session(tx);
    tracing::info!(session_id = %session_id, "a user connected");

    // Spawn task to forward events from the queue to the WebSocket
    let sender_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // In-flight relay tasks for this connection
    let mut relay_tasks: JoinSet<Result<usize, AppError>> = JoinSet::new();

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(data) = parse_chat_message(session_id, text.as_str()) {
                            let relay = Arc::clone(&relay);
                            relay_tasks.spawn(async move {
                                relay.relay_chat_message(session_id, data).await
                            });
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(session_id = %session_id, "Connection closed");
                        break;
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                        // Pong is handled automatically by axum
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::debug!(session_id = %session_id, "Ignoring binary frame");
                    }
                    Some(Err(e)) => {
                        tracing::debug!(session_id = %session_id, error = %e, "WebSocket error");
                        break;
                    }
                }
            }

            Some(joined) = relay_tasks.join_next(), if !relay_tasks.is_empty() => {
                if let Err(e) = joined {
                    tracing::error!(session_id = %session_id, error = %e, "Relay task failed");
                }
            }
        }
    }

    // Cleanup. Messages already being stored still get broadcast to the
    // remaining connections.
    relay.unregister_session(&session_id);
    relay_tasks.detach_all();
    sender_task.abort();

    tracing::info!(session_id = %session_id, "user disconnected");
}

/// Extract the payload of an inbound `chat message` frame. Anything else is
/// logged and dropped.
fn parse_chat_message(session_id: Uuid, text: &str) -> Option<serde_json::Value> {
    let event = match serde_json::from_str::<SocketEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(session_id = %session_id, error = %e, "Invalid frame");
            return None;
        }
    };

    if event.is_chat_message() {
        Some(event.data)
    } else {
        tracing::debug!(session_id = %session_id, event = %event.event, "Unknown event");
        None
    }
}
