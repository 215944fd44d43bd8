//! Repository for the `mood_checkins` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use slimpath_core::types::UserId;

use crate::models::mood::MoodCheckin;

const COLUMNS: &str = "id, user_id, mood, time_of_day, notes, date, created_at";

/// Provides operations on mood check-ins.
pub struct MoodRepo;

impl MoodRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: UserId,
        mood: &str,
        time_of_day: &str,
        notes: Option<&str>,
        date: NaiveDate,
    ) -> Result<MoodCheckin, sqlx::Error> {
        let query = format!(
            "INSERT INTO mood_checkins (user_id, mood, time_of_day, notes, date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MoodCheckin>(&query)
            .bind(user_id)
            .bind(mood)
            .bind(time_of_day)
            .bind(notes)
            .bind(date)
            .fetch_one(pool)
            .await
    }

    /// All check-ins for one user on one date, oldest first.
    pub async fn list_for_date(
        pool: &PgPool,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<Vec<MoodCheckin>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mood_checkins
             WHERE user_id = $1 AND date = $2 ORDER BY created_at"
        );
        sqlx::query_as::<_, MoodCheckin>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }
}
