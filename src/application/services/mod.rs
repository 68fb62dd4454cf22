//! Application Services
//!
//! - **MessageService**: listing and creating chat messages

pub mod message_service;

pub use message_service::MessageService;
