//! Database Module
//!
//! PostgreSQL connection pool, schema bootstrap, and store selection.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::{DatabaseSettings, StorageBackend};
use crate::domain::MessageRepository;
use crate::infrastructure::repositories::{InMemoryMessageRepository, PgMessageRepository};

/// Schema for the single `messages` collection. Idempotent, so it runs on
/// every start in place of versioned migrations.
const CREATE_MESSAGES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id          UUID PRIMARY KEY,
        username    TEXT NOT NULL,
        message     TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Create the `messages` table if it does not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_MESSAGES_TABLE).execute(pool).await?;
    Ok(())
}

/// Connect the configured message store.
///
/// Fails if the database is unreachable; callers treat that as fatal.
pub async fn connect_store(
    settings: &DatabaseSettings,
) -> Result<Arc<dyn MessageRepository>, sqlx::Error> {
    match settings.backend {
        StorageBackend::Postgres => {
            let pool = create_pool(settings).await?;
            ensure_schema(&pool).await?;
            tracing::info!(
                max_connections = settings.max_connections,
                "PostgreSQL message store connected"
            );
            Ok(Arc::new(PgMessageRepository::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory message store; messages are lost on restart");
            Ok(Arc::new(InMemoryMessageRepository::new()))
        }
    }
}
