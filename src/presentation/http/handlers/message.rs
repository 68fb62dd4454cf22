//! Message Handlers

use axum::{extract::State, Json};

use crate::application::dto::ChatPayload;
use crate::domain::Message;
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List every stored message
pub async fn get_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.messages.list_messages().await?;

    Ok(Json(messages))
}

/// Store a message.
///
/// Messages created here are not broadcast to socket clients.
pub async fn create_message(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ChatPayload>,
) -> Result<Json<Message>, AppError> {
    let message = state.messages.create_message(body).await?;
    metrics::record_http_message_created();

    Ok(Json(message))
}
