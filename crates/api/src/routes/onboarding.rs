//! Route definitions for the `/onboarding` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`. All require auth.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(onboarding::get).put(onboarding::save))
        .route("/complete", post(onboarding::complete))
}
