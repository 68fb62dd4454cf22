//! Health endpoints: `/health`, `/health/live` and `/health/ready`.

use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::startup::AppState;

/// A store ping slower than this reports `degraded`.
const SLOW_STORE_PING: Duration = Duration::from_millis(100);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadyStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl ReadyStatus {
    fn from_ping(elapsed: Option<Duration>) -> Self {
        match elapsed {
            Some(elapsed) if elapsed < SLOW_STORE_PING => ReadyStatus::Healthy,
            Some(_) => ReadyStatus::Degraded,
            None => ReadyStatus::Unhealthy,
        }
    }

    fn status_code(self) -> StatusCode {
        match self {
            ReadyStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::OK,
        }
    }
}

/// Readiness report: whether the relay can persist, and how many sockets it serves.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: ReadyStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_latency_ms: Option<u64>,
    pub active_connections: usize,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// 200 while the store answers pings, 503 once it does not.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let started = Instant::now();
    let elapsed = match state.messages.ping().await {
        Ok(()) => Some(started.elapsed()),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check could not reach the message store");
            None
        }
    };

    let status = ReadyStatus::from_ping(elapsed);
    let body = ReadinessResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_latency_ms: elapsed.map(|d| d.as_millis() as u64),
        active_connections: state.relay.session_count(),
    };

    (status.status_code(), Json(body))
}
