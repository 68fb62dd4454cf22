//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Body returned for every server-side failure. Details stay in the logs.
pub const SERVER_ERROR_BODY: &str = "Server Error";

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// `message` summarizes the first failing field; `fields` lists all of them.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response body for client errors
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            AppError::BadRequest(message) => ErrorResponse {
                code: 10002,
                message,
                errors: None,
            },
            AppError::Validation { message, fields } => ErrorResponse {
                code: 10007,
                message,
                errors: Some(fields),
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY).into_response();
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
