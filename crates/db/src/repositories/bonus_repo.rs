//! Repository for `bonus_content` and `user_bonus_unlocks`.

use sqlx::PgPool;
use slimpath_core::types::UserId;

use crate::models::bonus::{BonusContent, CreateBonusContent, UpdateBonusContent};

const COLUMNS: &str = "id, title, description, content_type, content_url, unlock_points, \
                       is_active, created_at, updated_at";

/// Provides operations on bonus content and unlock records.
pub struct BonusRepo;

impl BonusRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateBonusContent,
    ) -> Result<BonusContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO bonus_content (title, description, content_type, content_url,
                                        unlock_points, is_active)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BonusContent>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content_type)
            .bind(&input.content_url)
            .bind(input.unlock_points)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<BonusContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bonus_content ORDER BY unlock_points, title");
        sqlx::query_as::<_, BonusContent>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<BonusContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bonus_content WHERE is_active ORDER BY unlock_points, title"
        );
        sqlx::query_as::<_, BonusContent>(&query)
            .fetch_all(pool)
            .await
    }

    /// Active bonuses whose point requirement is within `points`.
    pub async fn list_eligible(
        pool: &PgPool,
        points: i32,
    ) -> Result<Vec<BonusContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bonus_content
             WHERE is_active AND unlock_points <= $1 ORDER BY unlock_points"
        );
        sqlx::query_as::<_, BonusContent>(&query)
            .bind(points)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: UserId,
        input: &UpdateBonusContent,
    ) -> Result<Option<BonusContent>, sqlx::Error> {
        let query = format!(
            "UPDATE bonus_content SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                content_type = COALESCE($4, content_type),
                content_url = COALESCE($5, content_url),
                unlock_points = COALESCE($6, unlock_points),
                is_active = COALESCE($7, is_active),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BonusContent>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content_type)
            .bind(&input.content_url)
            .bind(input.unlock_points)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bonus_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- unlock records ---

    /// Record an unlock. A duplicate unlock is not an error.
    pub async fn record_unlock(
        pool: &PgPool,
        user_id: UserId,
        bonus_content_id: UserId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_bonus_unlocks (user_id, bonus_content_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, bonus_content_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(bonus_content_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// IDs of bonuses the user has unlocked.
    pub async fn unlocked_ids(pool: &PgPool, user_id: UserId) -> Result<Vec<UserId>, sqlx::Error> {
        sqlx::query_scalar("SELECT bonus_content_id FROM user_bonus_unlocks WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
