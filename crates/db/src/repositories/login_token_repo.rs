//! Repository for the `login_tokens` table.

use sqlx::PgPool;
use slimpath_core::types::UserId;

use crate::models::login_token::LoginToken;

const COLUMNS: &str = "id, identity_id, token_hash, expires_at, used_at, created_at";

/// Provides operations on passwordless sign-in tokens.
pub struct LoginTokenRepo;

impl LoginTokenRepo {
    /// Store a new token hash with the given validity window (hours).
    pub async fn create(
        pool: &PgPool,
        identity_id: UserId,
        token_hash: &str,
        valid_hours: i64,
    ) -> Result<LoginToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO login_tokens (identity_id, token_hash, expires_at)
             VALUES ($1, $2, now() + make_interval(hours => $3::int))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LoginToken>(&query)
            .bind(identity_id)
            .bind(token_hash)
            .bind(valid_hours)
            .fetch_one(pool)
            .await
    }

    /// Atomically consume an unused, unexpired token by hash. Returns the
    /// row if one was consumed, `None` if the token is invalid, already
    /// used, or expired.
    pub async fn consume(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<LoginToken>, sqlx::Error> {
        let query = format!(
            "UPDATE login_tokens SET used_at = now()
             WHERE token_hash = $1 AND used_at IS NULL AND expires_at > now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LoginToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }
}
