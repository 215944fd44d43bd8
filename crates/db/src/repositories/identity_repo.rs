//! Repository for the `auth_identities` table.

use sqlx::PgPool;
use slimpath_core::types::UserId;

use crate::models::identity::{CreateIdentity, Identity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, password_hash, email_confirmed_at, is_admin, created_at, updated_at";

/// Provides operations on authentication identities.
pub struct IdentityRepo;

impl IdentityRepo {
    /// Insert a new identity, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateIdentity) -> Result<Identity, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_identities (email, password_hash, email_confirmed_at)
             VALUES ($1, $2, CASE WHEN $3 THEN now() ELSE NULL END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Identity>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.confirmed)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<Identity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_identities WHERE id = $1");
        sqlx::query_as::<_, Identity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an identity by email, case-insensitively.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Identity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_identities WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, Identity>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replace the stored password hash.
    pub async fn set_password_hash(
        pool: &PgPool,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE auth_identities SET password_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark the email confirmed if it is not already. Idempotent.
    pub async fn confirm_email(pool: &PgPool, id: UserId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE auth_identities SET email_confirmed_at = now(), updated_at = now()
             WHERE id = $1 AND email_confirmed_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
