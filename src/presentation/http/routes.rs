//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{middleware, response::IntoResponse, routing::get, Router};
use tower_http::services::ServeDir;

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::logging::track_metrics;
use crate::presentation::websocket::ws_handler;
use crate::startup::AppState;

/// Create the main router.
///
/// Paths not claimed by the API, socket, health, or metrics routes fall
/// through to static files.
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.settings.server.static_dir);

    Router::new()
        .nest("/api", api_routes())
        // Realtime relay endpoint
        .route("/socket", get(ws_handler))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .fallback_service(static_files)
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/messages",
        get(handlers::message::get_messages).post(handlers::message::create_message),
    )
}
