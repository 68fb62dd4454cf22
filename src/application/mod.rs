//! Application Layer
//!
//! Contains the message service and the request DTOs. This layer sits
//! between the presentation layer (HTTP and socket) and the store.

pub mod services;
pub mod dto;
