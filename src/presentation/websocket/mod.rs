//! Realtime Relay
//!
//! WebSocket endpoint that persists inbound chat messages and rebroadcasts
//! them to every open connection.

pub mod handler;
pub mod messages;
pub mod relay;

pub use handler::ws_handler;
pub use messages::{SocketEvent, CHAT_MESSAGE_EVENT, ERROR_EVENT};
pub use relay::Relay;
