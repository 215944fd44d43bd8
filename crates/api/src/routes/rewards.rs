//! Route definitions for the `/rewards` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::rewards;
use crate::state::AppState;

/// Routes mounted at `/rewards`. Requires auth.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(rewards::list))
}
