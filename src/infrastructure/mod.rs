//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database connection and schema bootstrap (PostgreSQL)
//! - Message store implementations (PostgreSQL, in-memory)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
