//! Health check handler

use axum::{extract::State, Json};

use crate::{
    database::{check_health, StoreStatus},
    models::responses::{ApiResponse, HealthCheckResponse},
    state::AppState,
};

/// GET /api/health
///
/// Always answers 200 while the process is up and reports whether the
/// document store is reachable.
///
/// # Example
/// ```bash
/// curl http://localhost:5000/api/health
/// # Returns: {"success":true,"data":{"status":"ok","database":"connected"}}
/// ```
pub async fn health_check(
    State(state): State<AppState>,
) -> Json<ApiResponse<HealthCheckResponse>> {
    let database = check_health(state.store.as_deref()).await;

    if database == StoreStatus::Unavailable {
        tracing::warn!("Health check: document store unavailable");
    }

    Json(ApiResponse::data(HealthCheckResponse {
        status: "ok".to_string(),
        database,
    }))
}
