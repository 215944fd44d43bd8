//! Handlers for the `/onboarding` resource (intake wizard).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use slimpath_core::biometrics;
use slimpath_db::models::onboarding::{IntakeData, UserOnboarding};
use slimpath_db::repositories::{ContentRepo, OnboardingRepo, ProgressRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Intake record plus derived values the wizard displays.
#[derive(Debug, Serialize)]
pub struct OnboardingView {
    #[serde(flatten)]
    pub record: UserOnboarding,
    /// Recommended daily water intake in liters (35 ml/kg), when weight
    /// is known.
    pub water_intake_liters: Option<f64>,
}

fn view(record: UserOnboarding) -> OnboardingView {
    let water_intake_liters = record.current_weight_kg.map(biometrics::water_intake_liters);
    OnboardingView {
        record,
        water_intake_liters,
    }
}

/// BMI from the intake data when both measurements are present.
fn computed_bmi(data: &IntakeData) -> Option<f64> {
    match (data.current_weight_kg, data.height_cm) {
        (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(biometrics::bmi(w, h)),
        _ => None,
    }
}

/// GET /api/v1/onboarding
pub async fn get(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<OnboardingView>>> {
    let record = OnboardingRepo::get_or_create(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: view(record) }))
}

/// PUT /api/v1/onboarding
///
/// Partial save: absent fields keep their stored values. BMI is always
/// recomputed server-side, never accepted from the client.
pub async fn save(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<IntakeData>,
) -> AppResult<Json<DataResponse<OnboardingView>>> {
    let bmi = computed_bmi(&input);
    let record = OnboardingRepo::save_intake(&state.pool, user.user_id, &input, bmi).await?;
    Ok(Json(DataResponse { data: view(record) }))
}

/// POST /api/v1/onboarding/complete
///
/// Saves the final intake data, marks the record completed (keeping the
/// original `completed_at` on repeat calls), and seeds the day-1 progress
/// row so the dashboard has something to show immediately.
pub async fn complete(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<IntakeData>,
) -> AppResult<Json<DataResponse<OnboardingView>>> {
    let bmi = computed_bmi(&input);
    OnboardingRepo::save_intake(&state.pool, user.user_id, &input, bmi).await?;
    let record = OnboardingRepo::mark_completed(&state.pool, user.user_id).await?;

    let tasks_total = match ContentRepo::find_by_day(&state.pool, 1).await? {
        Some(content) => ContentRepo::list_tasks(&state.pool, content.id).await?.len() as i32,
        None => 0,
    };
    ProgressRepo::init_day_one(&state.pool, user.user_id, Utc::now().date_naive(), tasks_total)
        .await?;

    tracing::info!(user_id = %user.user_id, "Onboarding completed");
    Ok(Json(DataResponse { data: view(record) }))
}
