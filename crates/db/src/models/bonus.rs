//! Bonus content models and admin DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slimpath_core::types::{Timestamp, UserId};

/// A row from the `bonus_content` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BonusContent {
    pub id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub content_url: Option<String>,
    pub unlock_points: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateBonusContent {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    pub content_url: Option<String>,
    #[serde(default)]
    pub unlock_points: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBonusContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub content_url: Option<String>,
    pub unlock_points: Option<i32>,
    pub is_active: Option<bool>,
}

fn default_content_type() -> String {
    "article".to_string()
}

fn default_true() -> bool {
    true
}
