//! Data Transfer Objects
//!
//! DTOs for API and socket request payloads.

pub mod request;

pub use request::ChatPayload;
