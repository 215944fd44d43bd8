//! Route definitions, grouped by resource.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod onboarding;
pub mod rewards;
pub mod webhook;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/magic-link/verify       POST  (public)
/// /auth/login                   POST  (public)
/// /auth/set-password            POST  (requires auth)
/// /auth/me                      GET   (requires auth)
///
/// /onboarding                   GET, PUT
/// /onboarding/complete          POST
///
/// /dashboard                    GET
/// /dashboard/tasks/toggle       POST
/// /dashboard/mood               POST
///
/// /rewards                      GET
///
/// /admin/...                    content/tasks/profile-content/bonus/users
///                               CRUD (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/onboarding", onboarding::router())
        .nest("/dashboard", dashboard::router())
        .nest("/rewards", rewards::router())
        .nest("/admin", admin::router())
}
