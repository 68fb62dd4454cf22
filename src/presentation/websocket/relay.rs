//! Chat Relay
//!
//! Tracks open connections and fans chat messages out to all of them.

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::SocketEvent;
use crate::application::dto::ChatPayload;
use crate::application::services::MessageService;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Relay shared by every WebSocket connection
pub struct Relay {
    /// Open connections by session id, each feeding that socket's writer task
    sessions: DashMap<Uuid, mpsc::UnboundedSender<SocketEvent>>,
    messages: MessageService,
}

impl Relay {
    pub fn new(messages: MessageService) -> Self {
        Self {
            sessions: DashMap::new(),
            messages,
        }
    }

    /// Register a new connection and return its session id
    pub fn register_session(&self, sender: mpsc::UnboundedSender<SocketEvent>) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.insert(session_id, sender);
        metrics::set_websocket_connections(self.sessions.len());

        tracing::debug!(session_id = %session_id, "Session registered");
        session_id
    }

    /// Unregister a connection
    pub fn unregister_session(&self, session_id: &Uuid) {
        if self.sessions.remove(session_id).is_some() {
            metrics::set_websocket_connections(self.sessions.len());
            tracing::debug!(session_id = %session_id, "Session unregistered");
        }
    }

    /// Send an event to every open connection. Returns how many accepted it.
    pub fn broadcast(&self, event: SocketEvent) -> usize {
        self.sessions
            .iter()
            .filter(|session| session.value().send(event.clone()).is_ok())
            .count()
    }

    /// Send an event to a single connection
    pub fn send_to_session(&self, session_id: &Uuid, event: SocketEvent) -> bool {
        self.sessions
            .get(session_id)
            .map(|session| session.send(event).is_ok())
            .unwrap_or(false)
    }

    /// Get session count
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Handle one inbound `chat message` event from `session_id`.
    ///
    /// The payload is validated and persisted, then the data exactly as
    /// received is broadcast to every connection, sender included. The
    /// broadcast never happens if persistence fails; the sender gets an
    /// `error` event instead.
    pub async fn relay_chat_message(
        &self,
        session_id: Uuid,
        data: serde_json::Value,
    ) -> Result<usize, AppError> {
        let payload = match ChatPayload::from_value(&data) {
            Ok(payload) => payload,
            Err(e) => {
                metrics::record_relay_outcome("rejected");
                tracing::debug!(session_id = %session_id, error = %e, "Rejected chat message");
                self.send_to_session(&session_id, SocketEvent::error(e.to_string()));
                return Err(e);
            }
        };

        if let Err(e) = self.messages.create_message(payload).await {
            metrics::record_relay_outcome("store_failed");
            tracing::error!(session_id = %session_id, error = %e, "Failed to store chat message");
            self.send_to_session(&session_id, SocketEvent::server_error());
            return Err(e);
        }

        let delivered = self.broadcast(SocketEvent::chat_message(data));
        metrics::record_relay_outcome("broadcast");
        tracing::debug!(session_id = %session_id, delivered = delivered, "Chat message relayed");

        Ok(delivered)
    }
}
