//! Shared helpers for integration tests.

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

use slimpath_api::auth::jwt::{generate_access_token, JwtConfig};
use slimpath_api::config::ServerConfig;
use slimpath_api::router::build_app_router;
use slimpath_api::state::AppState;
use slimpath_core::types::UserId;

/// Shared secret the test app expects on webhook deliveries.
pub const TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";

/// Build a test `ServerConfig` with safe defaults. No environment reads,
/// so tests never depend on ambient variables.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-jwt-secret".to_string(),
            access_token_expiry_mins: 60,
        },
        webhook_secret: Some(TEST_WEBHOOK_SECRET.to_string()),
        app_base_url: Some("https://app.test".to_string()),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors `main.rs` exactly (via
/// `build_app_router`), minus the SMTP mailer.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: None,
    };
    build_app_router(state, &config)
}

/// Mint a member access token for the given identity id.
pub fn member_token(user_id: UserId) -> String {
    generate_access_token(user_id, "member", &test_config().jwt).expect("token generation")
}

/// Mint an admin access token for the given identity id.
pub fn admin_token(user_id: UserId) -> String {
    generate_access_token(user_id, "admin", &test_config().jwt).expect("token generation")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body is not JSON: {e}: {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Assert a response is an error with the given status and `code` field.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
}
