//! Request DTOs
//!
//! The single inbound shape shared by `POST /api/messages` and the socket
//! `chat message` event.

use serde::Deserialize;
use validator::Validate;

use crate::domain::NewMessage;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;

/// Chat message as submitted by a client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ChatPayload {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl ChatPayload {
    /// Parse and validate an untyped payload, as received on the socket.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, AppError> {
        let payload = Self::deserialize(value)
            .map_err(|e| AppError::BadRequest(format!("Invalid chat message: {}", e)))?;
        payload.validate().map_err(validation_error)?;
        Ok(payload)
    }
}

impl From<ChatPayload> for NewMessage {
    fn from(payload: ChatPayload) -> Self {
        NewMessage::new(payload.username, payload.message)
    }
}
