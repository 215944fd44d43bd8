//! Handler for the checkout webhook (`POST /api/webhook`).
//!
//! The request moves through explicit gates: secret validation, payload
//! normalization, idempotent account provisioning, then a best-effort
//! magic-link notification. The secret and normalization gates return
//! early with 401/400; identity-creation failure aborts with 500. The
//! onboarding-record ensure and the notification never fail the request.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::header::{CONTENT_TYPE, HOST};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};
use slimpath_core::error::CoreError;
use slimpath_core::types::UserId;
use slimpath_core::webhook::{self, Registration, DEFAULT_TEST_PASSWORD, WEBHOOK_SOURCE};
use slimpath_db::models::identity::CreateIdentity;
use slimpath_db::models::user::{UpsertUser, User};
use slimpath_db::repositories::{IdentityRepo, LoginTokenRepo, OnboardingRepo, UserRepo};

use crate::auth::magic_link::{self, TOKEN_VALID_HOURS};
use crate::auth::password::hash_password;
use crate::config::PRODUCTION_BASE_URL;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Maximum accepted webhook body size (1 MiB).
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Attempts when checking whether the profile row already exists after
/// creating a new identity.
const PROFILE_CHECK_ATTEMPTS: u32 = 3;

/// Initial backoff between profile-existence checks; doubles per attempt.
const PROFILE_CHECK_BASE_DELAY: Duration = Duration::from_millis(50);

/// Success body returned to the payment processor.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub user_id: UserId,
    pub message: String,
}

/// POST /api/webhook
pub async fn receive(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    req: Request,
) -> AppResult<Json<WebhookResponse>> {
    let headers = req.headers().clone();
    let secret_header = header_str(&headers, "x-webhook-secret");
    let host = header_str(&headers, HOST.as_str());

    let body = read_body(req, &headers).await?;

    // Gate 1: shared secret.
    let expected = state.config.webhook_secret.as_deref().ok_or_else(|| {
        CoreError::Configuration("WEBHOOK_SECRET is not set; refusing all deliveries".into())
    })?;
    let presented = webhook::find_secret(&query, &body, secret_header.as_deref());
    if presented.as_deref() != Some(expected) {
        tracing::warn!(present = presented.is_some(), "Webhook secret mismatch");
        return Err(CoreError::Unauthorized("Invalid webhook secret".into()).into());
    }

    // Gate 2: normalization.
    let registration = webhook::normalize(&body, &query)?;
    tracing::info!(
        email = %registration.email,
        plan = registration.plan.as_str(),
        profile_type = registration.profile_type.as_str(),
        test_signup = registration.is_test_signup(),
        "Webhook registration normalized"
    );

    // Provisioning (identity + profile are fatal, onboarding ensure is not).
    let user = provision(&state, &registration).await?;

    // Notification is best effort: the account exists even if the email
    // never goes out.
    let base_url = resolve_base_url(&state, host.as_deref());
    if let Err(err) = send_magic_link(&state, user.id, &registration.email, &base_url).await {
        tracing::warn!(error = %err, email = %registration.email, "Magic-link notification failed");
    }

    Ok(Json(WebhookResponse {
        success: true,
        user_id: user.id,
        message: "Registration processed".to_string(),
    }))
}

/// Decode the request body into a flat JSON object, regardless of
/// transport encoding. An absent or empty body yields an empty object;
/// a malformed JSON body is a 400.
async fn read_body(req: Request, headers: &HeaderMap) -> AppResult<Value> {
    let content_type = header_str(headers, CONTENT_TYPE.as_str()).unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?;
        let mut map = Map::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?;
            map.insert(name, Value::String(text));
        }
        return Ok(Value::Object(map));
    }

    let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

    if bytes.is_empty() {
        return Ok(json!({}));
    }

    if content_type.starts_with("application/json") {
        return serde_json::from_slice(&bytes)
            .map_err(|e| CoreError::Validation(format!("Invalid JSON body: {e}")).into());
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let fields: HashMap<String, String> = serde_urlencoded::from_bytes(&bytes)
            .map_err(|e| CoreError::Validation(format!("Invalid form body: {e}")))?;
        let map = fields
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        return Ok(Value::Object(map));
    }

    // Unknown content type: ignore the body, query parameters may still
    // carry the whole registration.
    Ok(json!({}))
}

/// Idempotently ensure identity, profile, and onboarding record exist.
async fn provision(state: &AppState, reg: &Registration) -> AppResult<User> {
    let pool = &state.pool;

    let (identity_id, newly_created) = match IdentityRepo::find_by_email(pool, &reg.email).await? {
        Some(identity) => {
            tracing::debug!(identity_id = %identity.id, "Reusing existing identity");
            if let Some(password) = &reg.password {
                let hash = hash_password(password)
                    .map_err(|e| CoreError::Provisioning(format!("Password hash failed: {e}")))?;
                IdentityRepo::set_password_hash(pool, identity.id, &hash).await?;
            }
            (identity.id, false)
        }
        None => {
            let is_test = reg.is_test_signup();
            let password = reg
                .password
                .clone()
                .or_else(|| is_test.then(|| DEFAULT_TEST_PASSWORD.to_string()));
            let password_hash = match &password {
                Some(p) => Some(hash_password(p).map_err(|e| {
                    CoreError::Provisioning(format!("Password hash failed: {e}"))
                })?),
                None => None,
            };
            let identity = IdentityRepo::create(
                pool,
                &CreateIdentity {
                    email: reg.email.clone(),
                    password_hash,
                    // Test signups stay unconfirmed so the follow-up
                    // verification link can confirm them.
                    confirmed: !is_test,
                },
            )
            .await
            .map_err(|e| CoreError::Provisioning(format!("Identity creation failed: {e}")))?;
            tracing::info!(identity_id = %identity.id, "Created new identity");
            (identity.id, true)
        }
    };

    if newly_created {
        // Out-of-band provisioning may insert the profile row shortly
        // after the identity appears; poll briefly before upserting so a
        // concurrent insert becomes an update. Absence after the retries
        // just means the upsert inserts.
        wait_for_profile(pool, identity_id).await?;
    }

    let now = Utc::now();
    let upsert = UpsertUser {
        id: identity_id,
        email: reg.email.clone(),
        full_name: reg.full_name.clone(),
        profile_type: reg.profile_type.as_str().to_string(),
        subscription_plan: reg.plan.as_str().to_string(),
        subscription_end_date: reg.plan.term_end(now),
        webhook_data: json!({
            "transaction_id": reg.transaction_id,
            "amount": reg.amount,
            "source": WEBHOOK_SOURCE,
            "raw_sku": reg.raw_sku,
            "received_at": now,
        }),
    };
    let user = UserRepo::upsert_from_webhook(pool, &upsert)
        .await
        .map_err(|e| CoreError::Provisioning(format!("Profile upsert failed: {e}")))?;

    // Never overwrite existing onboarding progress, and never let this
    // step fail the webhook.
    if let Err(err) = OnboardingRepo::ensure_exists(pool, user.id).await {
        tracing::warn!(error = %err, user_id = %user.id, "Failed to ensure onboarding record");
    }

    Ok(user)
}

/// Bounded retry-with-backoff for the profile-existence check.
async fn wait_for_profile(pool: &slimpath_db::DbPool, id: UserId) -> Result<(), sqlx::Error> {
    let mut delay = PROFILE_CHECK_BASE_DELAY;
    for attempt in 1..=PROFILE_CHECK_ATTEMPTS {
        if UserRepo::find_by_id(pool, id).await?.is_some() {
            return Ok(());
        }
        if attempt < PROFILE_CHECK_ATTEMPTS {
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
    Ok(())
}

/// Base URL for emailed links: configuration, then the request host,
/// then the production fallback.
fn resolve_base_url(state: &AppState, host: Option<&str>) -> String {
    if let Some(url) = &state.config.app_base_url {
        return url.trim_end_matches('/').to_string();
    }
    if let Some(host) = host {
        return format!("https://{host}");
    }
    PRODUCTION_BASE_URL.to_string()
}

/// Issue a single-use sign-in token and email the onboarding link.
async fn send_magic_link(
    state: &AppState,
    identity_id: UserId,
    email: &str,
    base_url: &str,
) -> AppResult<()> {
    let (plaintext, hash) = magic_link::generate_token();
    LoginTokenRepo::create(&state.pool, identity_id, &hash, TOKEN_VALID_HOURS).await?;

    let link = format!("{base_url}/onboarding?token={plaintext}");
    match &state.mailer {
        Some(mailer) => mailer
            .send_magic_link(email, &link)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?,
        None => {
            tracing::info!(%email, "Mailer not configured; skipping magic-link email");
        }
    }
    Ok(())
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
