//! Presentation Layer
//!
//! HTTP routes and the WebSocket relay.

pub mod http;
pub mod middleware;
pub mod websocket;
