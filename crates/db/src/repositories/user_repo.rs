//! Repository for the `users` profile table.

use sqlx::PgPool;
use slimpath_core::types::UserId;

use crate::models::user::{UpsertUser, User};

const COLUMNS: &str = "id, email, full_name, profile_type, status, subscription_plan, \
                       subscription_end_date, current_day, slim_points, bonus_unlocked, \
                       webhook_data, created_at, updated_at";

/// Provides operations on application profiles.
pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Idempotent webhook upsert keyed by the identity id.
    ///
    /// Inserts start at day 1 with zero points; updates refresh the
    /// subscription fields, set status back to active, and merge the new
    /// `webhook_data` into the existing blob -- they never touch the
    /// gamification counters.
    pub async fn upsert_from_webhook(
        pool: &PgPool,
        input: &UpsertUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, full_name, profile_type, status, subscription_plan,
                                subscription_end_date, webhook_data)
             VALUES ($1, $2, $3, $4, 'active', $5, $6, $7)
             ON CONFLICT (id) DO UPDATE SET
                full_name = COALESCE(EXCLUDED.full_name, users.full_name),
                profile_type = EXCLUDED.profile_type,
                status = 'active',
                subscription_plan = EXCLUDED.subscription_plan,
                subscription_end_date = EXCLUDED.subscription_end_date,
                webhook_data = users.webhook_data || EXCLUDED.webhook_data,
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.id)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.profile_type)
            .bind(&input.subscription_plan)
            .bind(input.subscription_end_date)
            .bind(&input.webhook_data)
            .fetch_one(pool)
            .await
    }

    /// Sync the cached `current_day` column to the freshly computed value.
    pub async fn set_current_day(
        pool: &PgPool,
        id: UserId,
        current_day: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET current_day = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(current_day)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Apply a point award: bump `slim_points` and optionally latch the
    /// bonus flag. Returns the updated row.
    pub async fn add_points(
        pool: &PgPool,
        id: UserId,
        points: i32,
        unlock_bonus: bool,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                slim_points = slim_points + $2,
                bonus_unlocked = bonus_unlocked OR $3,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(points)
            .bind(unlock_bonus)
            .fetch_one(pool)
            .await
    }
}
