//! # Domain Layer
//!
//! The domain layer holds the chat message model and the storage contract
//! the rest of the relay depends on. It has no knowledge of HTTP, WebSocket
//! framing, or which database backs the store.
//!
//! ## Structure
//!
//! - **entities**: the `Message` entity and its `MessageRepository` trait

pub mod entities;

// Re-export commonly used types
pub use entities::*;
