//! Route definition for the health check.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// `GET /health`, mounted at root level (not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::health))
}
