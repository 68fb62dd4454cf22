//! Message Service
//!
//! Thin coordination over the message store, shared by the REST handlers
//! and the realtime relay.

use std::sync::Arc;

use crate::application::dto::ChatPayload;
use crate::domain::{Message, MessageRepository, NewMessage};
use crate::shared::error::AppError;

/// Message service backed by a shared repository handle
#[derive(Clone)]
pub struct MessageService {
    message_repo: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(message_repo: Arc<dyn MessageRepository>) -> Self {
        Self { message_repo }
    }

    /// Get every stored message, in the order the store returns them
    pub async fn list_messages(&self) -> Result<Vec<Message>, AppError> {
        self.message_repo.find_all().await
    }

    /// Persist a validated payload
    pub async fn create_message(&self, payload: ChatPayload) -> Result<Message, AppError> {
        let new_message = NewMessage::from(payload);
        let message = self.message_repo.create(&new_message).await?;

        tracing::debug!(message_id = %message.id, username = %message.username, "Message stored");

        Ok(message)
    }

    /// Check that the store is reachable
    pub async fn ping(&self) -> Result<(), AppError> {
        self.message_repo.ping().await
    }
}
