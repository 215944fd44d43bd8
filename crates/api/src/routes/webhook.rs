//! Route definition for the checkout webhook.
//!
//! Mounted at `/api/webhook` (outside `/api/v1`) because the path is
//! registered verbatim with the payment processor and cannot change with
//! API versions.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhook;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/webhook", post(webhook::receive))
}
