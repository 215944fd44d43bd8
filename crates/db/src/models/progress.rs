//! Daily checklist progress model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use slimpath_core::types::{Timestamp, UserId};

/// A row from `user_daily_progress`: one per (user, day, calendar date).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserDailyProgress {
    pub id: UserId,
    pub user_id: UserId,
    pub day_number: i32,
    pub date: NaiveDate,
    /// IDs of the completed `daily_tasks` rows.
    pub tasks_completed: Vec<UserId>,
    pub tasks_total: i32,
    pub completion_percentage: i32,
    /// Latches once the day has paid out its slim point.
    pub point_earned: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
