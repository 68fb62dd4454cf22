//! # Domain Entities
//!
//! The relay stores exactly one kind of record: a chat message. Messages are
//! flat and independent, with no references to users, rooms, or sessions.
//!
//! ## Repository Traits
//!
//! `MessageRepository` defines the store contract. Implementations live in
//! the infrastructure layer (PostgreSQL and in-memory).

mod message;

pub use message::{Message, MessageRepository, NewMessage};

#[cfg(test)]
pub use message::MockMessageRepository;
