//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /magic-link/verify  -> verify_magic_link
/// POST /login              -> login
/// POST /set-password       -> set_password (requires auth)
/// GET  /me                 -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/magic-link/verify", post(auth::verify_magic_link))
        .route("/login", post(auth::login))
        .route("/set-password", post(auth::set_password))
        .route("/me", get(auth::me))
}
