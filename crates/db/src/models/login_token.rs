//! Passwordless sign-in token model.

use sqlx::FromRow;
use slimpath_core::types::{Timestamp, UserId};

/// A row from the `login_tokens` table. The token itself is never stored,
/// only its SHA-256 hex digest.
#[derive(Debug, Clone, FromRow)]
pub struct LoginToken {
    pub id: UserId,
    pub identity_id: UserId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
