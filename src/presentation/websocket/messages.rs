//! WebSocket Message Types
//!
//! Every frame in either direction is a JSON text frame of the form
//! `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::shared::error::SERVER_ERROR_BODY;

/// Chat message, inbound from a client and outbound to every client
pub const CHAT_MESSAGE_EVENT: &str = "chat message";

/// Failure notice, sent only to the connection that caused it
pub const ERROR_EVENT: &str = "error";

/// A named event with an arbitrary JSON payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketEvent {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl SocketEvent {
    pub fn new(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// `chat message` carrying the payload exactly as it was received
    pub fn chat_message(data: serde_json::Value) -> Self {
        Self::new(CHAT_MESSAGE_EVENT, data)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ERROR_EVENT, json!({ "message": message.into() }))
    }

    pub fn server_error() -> Self {
        Self::error(SERVER_ERROR_BODY)
    }

    pub fn is_chat_message(&self) -> bool {
        self.event == CHAT_MESSAGE_EVENT
    }
}
