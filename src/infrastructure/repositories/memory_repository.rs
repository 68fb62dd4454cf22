//! In-memory Message Repository
//!
//! Keeps messages in insertion order for the life of the process.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{Message, MessageRepository, NewMessage};
use crate::shared::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_all(&self) -> Result<Vec<Message>, AppError> {
        Ok(self.messages.read().clone())
    }

    async fn create(&self, message: &NewMessage) -> Result<Message, AppError> {
        let stored = message.clone().into_message(Uuid::now_v7(), Utc::now());
        self.messages.write().push(stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
