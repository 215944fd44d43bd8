//! Route definitions for the `/dashboard` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`. All require auth.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::get))
        .route("/tasks/toggle", post(dashboard::toggle_task))
        .route("/mood", post(dashboard::mood_checkin))
}
