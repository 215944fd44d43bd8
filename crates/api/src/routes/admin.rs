//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin role.
///
/// ```text
/// GET/POST       /content
/// GET/PUT/DELETE /content/{id}
/// GET/POST       /content/{id}/tasks
/// PUT/DELETE     /tasks/{id}
/// GET/POST       /content/{id}/profile-content
/// PUT/DELETE     /profile-content/{id}
/// GET/POST       /bonus
/// PUT/DELETE     /bonus/{id}
/// GET            /users
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/content",
            get(admin::list_content).post(admin::create_content),
        )
        .route(
            "/content/{id}",
            get(admin::get_content)
                .put(admin::update_content)
                .delete(admin::delete_content),
        )
        .route(
            "/content/{id}/tasks",
            get(admin::list_tasks).post(admin::create_task),
        )
        .route(
            "/tasks/{id}",
            put(admin::update_task).delete(admin::delete_task),
        )
        .route(
            "/content/{id}/profile-content",
            get(admin::list_profile_content).post(admin::create_profile_content),
        )
        .route(
            "/profile-content/{id}",
            put(admin::update_profile_content).delete(admin::delete_profile_content),
        )
        .route("/bonus", get(admin::list_bonus).post(admin::create_bonus))
        .route(
            "/bonus/{id}",
            put(admin::update_bonus).delete(admin::delete_bonus),
        )
        .route("/users", get(admin::list_users))
}
