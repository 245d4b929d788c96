//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (reads the events document)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 when the events document can be read, 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> Response {
    let backend = state.store.backend_name();

    match state.events.read_events().await {
        Ok(events) => (
            StatusCode::OK,
            Json(json!({
                "ready": true,
                "backend": backend,
                "events": events.len(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(backend, error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "ready": false,
                    "backend": backend,
                    "error": "Storage unavailable.",
                })),
            )
                .into_response()
        }
    }
}
