//! Mood check-in model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use slimpath_core::types::{Timestamp, UserId};

/// A row from the `mood_checkins` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MoodCheckin {
    pub id: UserId,
    pub user_id: UserId,
    pub mood: String,
    pub time_of_day: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}
