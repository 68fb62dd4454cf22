//! Message Repository Implementation
//!
//! PostgreSQL implementation of the message store.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Message, MessageRepository, NewMessage};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// PostgreSQL message repository implementation.
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Creates a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    username: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    /// Converts database row to domain Message entity.
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            username: self.username,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    /// Fetch all messages.
    ///
    /// Ordered by creation time with the time-ordered id as tie breaker,
    /// which is insertion order for a single writer.
    async fn find_all(&self) -> Result<Vec<Message>, AppError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, username, message, created_at
            FROM messages
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        metrics::record_db_query("select", "messages", started.elapsed().as_secs_f64());

        Ok(rows.into_iter().map(MessageRow::into_message).collect())
    }

    async fn create(&self, message: &NewMessage) -> Result<Message, AppError> {
        let started = Instant::now();
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, username, message)
            VALUES ($1, $2, $3)
            RETURNING id, username, message, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&message.username)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;
        metrics::record_db_query("insert", "messages", started.elapsed().as_secs_f64());

        Ok(row.into_message())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
