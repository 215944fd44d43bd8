//! Program content models and admin DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slimpath_core::types::{Timestamp, UserId};

/// A row from the `daily_content` table: the shared message and challenge
/// for one program day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyContent {
    pub id: UserId,
    pub day_number: i32,
    pub lean_message: String,
    pub micro_challenge: String,
    pub panic_button_text: Option<String>,
    pub panic_button_audio_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateDailyContent {
    pub day_number: i32,
    pub lean_message: String,
    pub micro_challenge: String,
    pub panic_button_text: Option<String>,
    pub panic_button_audio_url: Option<String>,
}

/// DTO for updating content. All fields optional; absent fields keep
/// their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateDailyContent {
    pub day_number: Option<i32>,
    pub lean_message: Option<String>,
    pub micro_challenge: Option<String>,
    pub panic_button_text: Option<String>,
    pub panic_button_audio_url: Option<String>,
}

/// A checklist item belonging to a day's content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyTask {
    pub id: UserId,
    pub daily_content_id: UserId,
    pub task_text: String,
    pub task_order: i32,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateDailyTask {
    pub task_text: String,
    #[serde(default)]
    pub task_order: i32,
}

/// Profile-type-specific content for one day (star food, allowed foods).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileContent {
    pub id: UserId,
    pub daily_content_id: UserId,
    pub profile_type: String,
    pub star_food_name: String,
    pub star_food_description: Option<String>,
    pub allowed_foods: Vec<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateProfileContent {
    pub profile_type: String,
    pub star_food_name: String,
    pub star_food_description: Option<String>,
    #[serde(default)]
    pub allowed_foods: Vec<String>,
}
