use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthData {
    status: &'static str,
    database: &'static str,
}

/// Liveness plus a `SELECT 1` against the pool.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthData>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        )
    } else {
        tracing::warn!("health check: database unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthData {
                status: "degraded",
                database: "unavailable",
            }),
        )
    }
}
