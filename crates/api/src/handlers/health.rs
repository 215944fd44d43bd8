//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Response for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Always 200; a broken database is reported in the body so load
/// balancers keep routing while operators see the degradation.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = slimpath_db::health_check(&state.pool).await.is_ok();
    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
