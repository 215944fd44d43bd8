//! Intake (onboarding) record model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slimpath_core::types::{Timestamp, UserId};

/// A row from the `user_onboarding` table. One per user; created blank by
/// the webhook and filled in by the intake wizard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserOnboarding {
    pub id: UserId,
    pub user_id: UserId,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub medications: Vec<String>,
    pub physical_limitations: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub diet_history: Option<String>,
    pub onboarding_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO carrying intake wizard data. Used both for partial saves and for
/// the completing upsert; BMI is computed server-side, not accepted from
/// the client.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeData {
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub physical_limitations: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    pub diet_history: Option<String>,
}
