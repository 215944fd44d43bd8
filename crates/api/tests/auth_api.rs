//! HTTP-level integration tests for the auth endpoints: login,
//! magic-link verification, set-password, and `/me`.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{assert_error, body_json, get_auth, member_token, post_json, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

use slimpath_api::auth::magic_link;
use slimpath_api::auth::password::hash_password;
use slimpath_core::types::UserId;
use slimpath_db::models::identity::CreateIdentity;
use slimpath_db::models::user::UpsertUser;
use slimpath_db::repositories::{IdentityRepo, LoginTokenRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a confirmed identity plus profile, returning the id and the
/// plaintext password.
async fn seed_member(pool: &PgPool, email: &str) -> (UserId, String) {
    let password = "member-password-1".to_string();
    let identity = IdentityRepo::create(
        pool,
        &CreateIdentity {
            email: email.to_string(),
            password_hash: Some(hash_password(&password).unwrap()),
            confirmed: true,
        },
    )
    .await
    .unwrap();

    UserRepo::upsert_from_webhook(
        pool,
        &UpsertUser {
            id: identity.id,
            email: email.to_string(),
            full_name: Some("Seed Member".to_string()),
            profile_type: "hormonal".to_string(),
            subscription_plan: "monthly".to_string(),
            subscription_end_date: Utc::now(),
            webhook_data: json!({}),
        },
    )
    .await
    .unwrap();

    (identity.id, password)
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_returns_token_and_user(pool: PgPool) {
    let (id, password) = seed_member(&pool, "login@x.com").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "login@x.com", "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], id.to_string());
    assert_eq!(json["user"]["email"], "login@x.com");
    assert_eq!(json["user"]["role"], "member");
    assert_eq!(json["user"]["onboarding_required"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_is_401(pool: PgPool) {
    seed_member(&pool, "wrongpw@x.com").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "wrongpw@x.com", "password": "incorrect" }),
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_unknown_email_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "nobody@x.com", "password": "whatever1" }),
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Magic link
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn magic_link_verify_signs_in_and_confirms_email(pool: PgPool) {
    // Unconfirmed identity, like a zero-amount signup.
    let identity = IdentityRepo::create(
        &pool,
        &CreateIdentity {
            email: "magic@x.com".to_string(),
            password_hash: None,
            confirmed: false,
        },
    )
    .await
    .unwrap();
    UserRepo::upsert_from_webhook(
        &pool,
        &UpsertUser {
            id: identity.id,
            email: "magic@x.com".to_string(),
            full_name: None,
            profile_type: "metabolic".to_string(),
            subscription_plan: "monthly".to_string(),
            subscription_end_date: Utc::now(),
            webhook_data: json!({}),
        },
    )
    .await
    .unwrap();

    let (plaintext, hash) = magic_link::generate_token();
    LoginTokenRepo::create(&pool, identity.id, &hash, 24).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app.clone(),
        "/api/v1/auth/magic-link/verify",
        json!({ "token": plaintext }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["email"], "magic@x.com");

    let identity = IdentityRepo::find_by_id(&pool, identity.id)
        .await
        .unwrap()
        .unwrap();
    assert!(identity.is_confirmed(), "following the link confirms the email");

    // The token is single use.
    let replay = post_json(
        app,
        "/api/v1/auth/magic-link/verify",
        json!({ "token": plaintext }),
    )
    .await;
    assert_error(replay, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_magic_link_is_rejected(pool: PgPool) {
    let (id, _) = seed_member(&pool, "expired@x.com").await;

    let (plaintext, hash) = magic_link::generate_token();
    LoginTokenRepo::create(&pool, id, &hash, 24).await.unwrap();
    sqlx::query("UPDATE login_tokens SET expires_at = now() - interval '1 hour'")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/magic-link/verify",
        json!({ "token": plaintext }),
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Set password / me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_password_replaces_credentials(pool: PgPool) {
    let (id, _) = seed_member(&pool, "setpw@x.com").await;
    let app = common::build_test_app(pool);
    let token = member_token(id);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/auth/set-password",
        &token,
        json!({ "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let login = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "setpw@x.com", "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_password_enforces_minimum_length(pool: PgPool) {
    let (id, _) = seed_member(&pool, "shortpw@x.com").await;
    let app = common::build_test_app(pool);
    let token = member_token(id);

    let response = post_json_auth(
        app,
        "/api/v1/auth/set-password",
        &token,
        json!({ "password": "short" }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_profile(pool: PgPool) {
    let (id, _) = seed_member(&pool, "me@x.com").await;
    let app = common::build_test_app(pool);
    let token = member_token(id);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@x.com");
    assert_eq!(json["data"]["profile_type"], "hormonal");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_without_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/auth/me").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}
