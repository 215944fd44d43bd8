//! Repository for the `user_daily_progress` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use slimpath_core::types::UserId;

use crate::models::progress::UserDailyProgress;

const COLUMNS: &str = "id, user_id, day_number, date, tasks_completed, tasks_total, \
                       completion_percentage, point_earned, created_at, updated_at";

/// Provides operations on daily progress rows.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Get the progress row for (user, day, date), creating a blank one
    /// if it does not exist yet. `tasks_total` is only set on insert so a
    /// later content edit does not rewrite history.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: UserId,
        day_number: i32,
        date: NaiveDate,
        tasks_total: i32,
    ) -> Result<UserDailyProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_daily_progress (user_id, day_number, date, tasks_total)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, day_number, date)
             DO UPDATE SET user_id = user_daily_progress.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserDailyProgress>(&query)
            .bind(user_id)
            .bind(day_number)
            .bind(date)
            .bind(tasks_total)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: UserId,
    ) -> Result<Option<UserDailyProgress>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_daily_progress WHERE id = $1");
        sqlx::query_as::<_, UserDailyProgress>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert the day-1 row created at onboarding completion. A duplicate
    /// (row already present) is not an error.
    pub async fn init_day_one(
        pool: &PgPool,
        user_id: UserId,
        date: NaiveDate,
        tasks_total: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_daily_progress (user_id, day_number, date, tasks_total)
             VALUES ($1, 1, $2, $3)
             ON CONFLICT (user_id, day_number, date) DO NOTHING",
        )
        .bind(user_id)
        .bind(date)
        .bind(tasks_total)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Write the recomputed completion state after a task toggle.
    /// `point_earned` only ever latches from false to true.
    pub async fn update_completion(
        pool: &PgPool,
        id: UserId,
        tasks_completed: &[UserId],
        completion_percentage: i32,
        point_earned: bool,
    ) -> Result<UserDailyProgress, sqlx::Error> {
        let query = format!(
            "UPDATE user_daily_progress SET
                tasks_completed = $2,
                completion_percentage = $3,
                point_earned = point_earned OR $4,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserDailyProgress>(&query)
            .bind(id)
            .bind(tasks_completed)
            .bind(completion_percentage)
            .bind(point_earned)
            .fetch_one(pool)
            .await
    }
}
