use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use loggate_observability::Operation;
use serde_json::{Value, json};
use tracing::warn;

/// `GET /api/health` — healthy iff the search backend answers a ping.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.backend.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))),
        Err(e) => {
            warn!(error = %e, "Search backend health check failed");
            state.metrics.record_backend_error(Operation::Health);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "error": e.to_string() })),
            )
        }
    }
}
