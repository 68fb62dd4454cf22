//! Repository Implementations
//!
//! Implementations of the domain `MessageRepository` trait.
//!
//! - **PgMessageRepository** - PostgreSQL-backed store
//! - **InMemoryMessageRepository** - process-local store for tests and
//!   database-less runs
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::domain::MessageRepository;
//! use crate::infrastructure::repositories::PgMessageRepository;
//!
//! let repo: Arc<dyn MessageRepository> = Arc::new(PgMessageRepository::new(pool));
//! ```

pub mod memory_repository;
pub mod message_repository;

pub use memory_repository::InMemoryMessageRepository;
pub use message_repository::PgMessageRepository;
