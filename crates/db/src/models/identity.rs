//! Authentication identity model and DTOs.
//!
//! An identity is the credential record (email + optional password hash),
//! distinct from the application profile in `users`.

use serde::Deserialize;
use sqlx::FromRow;
use slimpath_core::types::{Timestamp, UserId};

/// A row from the `auth_identities` table.
///
/// Contains the password hash -- never serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub password_hash: Option<String>,
    pub email_confirmed_at: Option<Timestamp>,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Identity {
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// DTO for creating a new identity.
#[derive(Debug, Deserialize)]
pub struct CreateIdentity {
    pub email: String,
    /// Pre-hashed (Argon2id PHC) password, when one is being set.
    pub password_hash: Option<String>,
    /// Whether the email is confirmed from the start (paid signups are).
    pub confirmed: bool,
}
