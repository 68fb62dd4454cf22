//! # Chat Relay Library
//!
//! A realtime chat relay with:
//! - A WebSocket endpoint that stores each `chat message` and rebroadcasts it
//!   to every connected client
//! - A REST API for listing and creating messages
//! - PostgreSQL (or in-memory) message storage
//!
//! ## Architecture
//!
//! - **Domain Layer**: the `Message` entity and the store trait
//! - **Application Layer**: the message service and request DTOs
//! - **Infrastructure Layer**: store implementations and metrics
//! - **Presentation Layer**: HTTP handlers and the WebSocket relay
//!
//! ## Module Structure
//!
//! ```text
//! chat_relay/
//! +-- config/         Configuration management
//! +-- domain/         Message entity and repository trait
//! +-- application/    Message service and DTOs
//! +-- infrastructure/ Database, repositories, metrics
//! +-- presentation/   HTTP routes and WebSocket relay
//! +-- shared/         Errors and validation helpers
//! ```

// Configuration module
pub mod config;

// Domain layer - Core model
pub mod domain;

// Application layer - Services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
