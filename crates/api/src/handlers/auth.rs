//! Handlers for the `/auth` resource (magic-link verify, login,
//! set-password, me).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use slimpath_core::error::CoreError;
use slimpath_core::types::UserId;
use slimpath_db::models::user::User;
use slimpath_db::repositories::{IdentityRepo, LoginTokenRepo, OnboardingRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, ROLE_ADMIN, ROLE_MEMBER};
use crate::auth::magic_link;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/magic-link/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/set-password`.
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub onboarding_required: bool,
}

fn role_for(is_admin: bool) -> &'static str {
    if is_admin {
        ROLE_ADMIN
    } else {
        ROLE_MEMBER
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/magic-link/verify
///
/// Consume a single-use sign-in token from an emailed link. Consuming is
/// atomic, so a token can never mint two sessions. A still-unconfirmed
/// identity (test signup) is confirmed here, since following the link
/// proves control of the mailbox.
pub async fn verify_magic_link(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<AuthResponse>> {
    let hash = magic_link::hash_token(&input.token);
    let token = LoginTokenRepo::consume(&state.pool, &hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired sign-in link".into(),
            ))
        })?;

    let identity = IdentityRepo::find_by_id(&state.pool, token.identity_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired sign-in link".into(),
            ))
        })?;

    if !identity.is_confirmed() {
        IdentityRepo::confirm_email(&state.pool, identity.id).await?;
    }

    let user = UserRepo::find_by_id(&state.pool, identity.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            key: identity.id.to_string(),
        })?;

    issue_session(&state, identity.id, role_for(identity.is_admin), user).await
}

/// POST /api/v1/auth/login
///
/// Unknown email and wrong password produce the same 401 message.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let identity = IdentityRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let hash = identity.password_hash.as_deref().ok_or_else(invalid)?;
    let verified = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        tracing::debug!(email = %input.email, "Failed login attempt");
        return Err(invalid());
    }

    let user = UserRepo::find_by_id(&state.pool, identity.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            key: identity.id.to_string(),
        })?;

    issue_session(&state, identity.id, role_for(identity.is_admin), user).await
}

/// POST /api/v1/auth/set-password
pub async fn set_password(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SetPasswordRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;

    let hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    IdentityRepo::set_password_hash(&state.pool, user.user_id, &hash).await?;

    tracing::info!(user_id = %user.user_id, "Password updated");
    Ok(Json(DataResponse {
        data: serde_json::json!({ "updated": true }),
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<User>>> {
    let profile = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            key: user.user_id.to_string(),
        })?;
    Ok(Json(DataResponse { data: profile }))
}

async fn issue_session(
    state: &AppState,
    identity_id: UserId,
    role: &str,
    user: User,
) -> AppResult<Json<AuthResponse>> {
    let onboarding_required = match OnboardingRepo::find_by_user(&state.pool, user.id).await? {
        Some(record) => !record.onboarding_completed,
        None => true,
    };

    let access_token = generate_access_token(identity_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: role.to_string(),
            onboarding_required,
        },
    }))
}
