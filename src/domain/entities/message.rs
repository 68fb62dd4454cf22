//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A persisted chat message.
///
/// Maps to the `messages` table:
/// - id: UUID PRIMARY KEY (v7, assigned at insert)
/// - username: TEXT NOT NULL
/// - message: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Store-assigned identifier
    pub id: Uuid,

    /// Display name of the sender, as supplied by the client
    pub username: String,

    /// Message body
    pub message: String,

    /// Timestamp assigned when the message was persisted
    pub created_at: DateTime<Utc>,
}

/// A message that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub username: String,
    pub message: String,
}

impl NewMessage {
    pub fn new(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
        }
    }

    /// Attach the store-assigned fields, producing the persisted form.
    pub fn into_message(self, id: Uuid, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            username: self.username,
            message: self.message,
            created_at,
        }
    }
}

/// Repository trait for Message data access operations.
///
/// A single implementation is shared by every HTTP handler and every socket
/// connection for the lifetime of the process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Return every stored message, in store order.
    async fn find_all(&self) -> Result<Vec<Message>, AppError>;

    /// Persist a new message and return it with its assigned id and timestamp.
    async fn create(&self, message: &NewMessage) -> Result<Message, AppError>;

    /// Cheap reachability check used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
