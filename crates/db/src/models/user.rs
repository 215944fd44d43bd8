//! Application profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slimpath_core::types::{Timestamp, UserId};

/// A row from the `users` table: subscription and gamification state,
/// keyed by the identity id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub profile_type: String,
    pub status: String,
    pub subscription_plan: Option<String>,
    pub subscription_end_date: Option<Timestamp>,
    pub current_day: i32,
    pub slim_points: i32,
    pub bonus_unlocked: bool,
    pub webhook_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the webhook's idempotent profile upsert.
///
/// Inserts initialize the gamification counters; updates leave them alone
/// and merge `webhook_data` into the existing blob.
#[derive(Debug, Deserialize)]
pub struct UpsertUser {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub profile_type: String,
    pub subscription_plan: String,
    pub subscription_end_date: Timestamp,
    pub webhook_data: serde_json::Value,
}
