//! Observability HTTP Routes
//!
//! Liveness banner and health check.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::store::{ConnectionState, RecordStore};

use super::record_routes::GatewayState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

impl HealthResponse {
    fn from_state(state: ConnectionState) -> Self {
        let status = match state {
            ConnectionState::Connected => "ok",
            ConnectionState::Disconnected => "degraded",
        };
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: state.as_str().to_string(),
        }
    }
}

/// `GET /` and `GET /health`
pub fn health_routes<S: RecordStore>(gateway: GatewayState<S>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler::<S>))
        .with_state(gateway)
}

async fn root_handler() -> &'static str {
    "Server is running"
}

/// Health check handler. Always 200; the body carries the store state.
async fn health_handler<S: RecordStore>(
    State(gateway): State<GatewayState<S>>,
) -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::from_state(gateway.state())))
}
