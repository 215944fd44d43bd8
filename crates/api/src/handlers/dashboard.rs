//! Handlers for the `/dashboard` resource: the daily program view, task
//! toggling with point awards, and mood check-ins.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use slimpath_core::error::CoreError;
use slimpath_core::gamification::{
    self, completion_percentage, should_earn_point, should_unlock_bonus,
};
use slimpath_core::profile::{Mood, TimeOfDay};
use slimpath_core::program;
use slimpath_core::types::UserId;
use slimpath_db::models::content::{DailyContent, DailyTask, ProfileContent};
use slimpath_db::models::mood::MoodCheckin;
use slimpath_db::models::progress::UserDailyProgress;
use slimpath_db::models::user::User;
use slimpath_db::repositories::{BonusRepo, ContentRepo, MoodRepo, OnboardingRepo, ProgressRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Everything the daily program screen needs in one round trip.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: User,
    pub current_day: i32,
    /// The day's shared content; `None` if no content row exists yet for
    /// this program day.
    pub content: Option<DayContent>,
    pub progress: UserDailyProgress,
    pub moods_today: Vec<MoodCheckin>,
}

/// One program day's content bundle.
#[derive(Debug, Serialize)]
pub struct DayContent {
    #[serde(flatten)]
    pub daily: DailyContent,
    pub tasks: Vec<DailyTask>,
    /// Star food and allowed foods for the caller's profile type, when
    /// configured.
    pub profile_content: Option<ProfileContent>,
}

/// Request body for `POST /dashboard/tasks/toggle`.
#[derive(Debug, Deserialize)]
pub struct ToggleTaskRequest {
    pub task_id: UserId,
    pub completed: bool,
}

/// Response for a task toggle: updated progress plus the (possibly
/// point-awarded) user row.
#[derive(Debug, Serialize)]
pub struct ToggleTaskResponse {
    pub progress: UserDailyProgress,
    pub user: User,
    /// True when this toggle paid out the day's slim point.
    pub point_earned: bool,
    pub bonus_unlocked: bool,
}

/// Request body for `POST /dashboard/mood`.
#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
    pub time_of_day: String,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardView>>> {
    let pool = &state.pool;

    let user = UserRepo::find_by_id(pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            key: auth.user_id.to_string(),
        })?;

    let onboarding = OnboardingRepo::find_by_user(pool, user.id).await?;
    let completed_at = match onboarding {
        Some(record) if record.onboarding_completed => record.completed_at,
        _ => {
            return Err(AppError::Core(CoreError::Conflict(
                "Onboarding must be completed before the program starts".into(),
            )))
        }
    };

    let today = Utc::now();
    let current_day = program::current_day(completed_at, today);

    // The column is a cache of the computed value; resync when they
    // drift apart (a new calendar day started).
    let user = if user.current_day != current_day {
        UserRepo::set_current_day(pool, user.id, current_day).await?;
        tracing::debug!(user_id = %user.id, current_day, "Synced current program day");
        User {
            current_day,
            ..user
        }
    } else {
        user
    };

    let content = load_day_content(&state, current_day, &user.profile_type).await?;
    let tasks_total = content.as_ref().map_or(0, |c| c.tasks.len() as i32);

    let progress = ProgressRepo::get_or_create(
        pool,
        user.id,
        current_day,
        today.date_naive(),
        tasks_total,
    )
    .await?;

    let moods_today = MoodRepo::list_for_date(pool, user.id, today.date_naive()).await?;

    Ok(Json(DataResponse {
        data: DashboardView {
            current_day,
            content,
            progress,
            moods_today,
            user,
        },
    }))
}

/// POST /api/v1/dashboard/tasks/toggle
///
/// Recomputes the day's completed set and percentage. The slim point pays
/// out exactly once per progress row, on the first transition to 100%;
/// unchecking tasks afterwards never claws it back. Crossing the 40-point
/// threshold latches `bonus_unlocked` and records an unlock for every
/// active bonus now within reach.
pub async fn toggle_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ToggleTaskRequest>,
) -> AppResult<Json<DataResponse<ToggleTaskResponse>>> {
    let pool = &state.pool;

    let user = UserRepo::find_by_id(pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            key: auth.user_id.to_string(),
        })?;

    let today = Utc::now();
    let content = load_day_content(&state, user.current_day, &user.profile_type).await?;
    let task_ids: Vec<UserId> = content
        .as_ref()
        .map(|c| c.tasks.iter().map(|t| t.id).collect())
        .unwrap_or_default();

    if !task_ids.contains(&input.task_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Task {} does not belong to day {}",
            input.task_id, user.current_day
        ))));
    }

    let progress = ProgressRepo::get_or_create(
        pool,
        user.id,
        user.current_day,
        today.date_naive(),
        task_ids.len() as i32,
    )
    .await?;

    let mut completed: Vec<UserId> = progress
        .tasks_completed
        .iter()
        .copied()
        .filter(|id| task_ids.contains(id))
        .collect();
    if input.completed {
        if !completed.contains(&input.task_id) {
            completed.push(input.task_id);
        }
    } else {
        completed.retain(|id| *id != input.task_id);
    }

    let percentage = completion_percentage(completed.len(), task_ids.len());
    let earns_point = should_earn_point(percentage, progress.point_earned);

    let progress =
        ProgressRepo::update_completion(pool, progress.id, &completed, percentage, earns_point)
            .await?;

    let (user, bonus_newly_unlocked) = if earns_point {
        let new_points = user.slim_points + gamification::POINTS_FOR_COMPLETION;
        let unlock = should_unlock_bonus(new_points, user.bonus_unlocked);
        let updated = UserRepo::add_points(
            pool,
            user.id,
            gamification::POINTS_FOR_COMPLETION,
            unlock,
        )
        .await?;
        tracing::info!(
            user_id = %updated.id,
            slim_points = updated.slim_points,
            bonus_unlocked = updated.bonus_unlocked,
            "Slim point awarded"
        );

        // Auto-unlock everything the new balance can afford. Duplicate
        // unlocks are no-ops in the repo.
        for bonus in BonusRepo::list_eligible(pool, updated.slim_points).await? {
            BonusRepo::record_unlock(pool, updated.id, bonus.id).await?;
        }
        (updated, unlock)
    } else {
        (user, false)
    };

    Ok(Json(DataResponse {
        data: ToggleTaskResponse {
            point_earned: earns_point,
            bonus_unlocked: bonus_newly_unlocked,
            progress,
            user,
        },
    }))
}

/// POST /api/v1/dashboard/mood
pub async fn mood_checkin(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MoodRequest>,
) -> AppResult<Json<DataResponse<MoodCheckin>>> {
    let mood = Mood::parse(&input.mood)?;
    let time_of_day = TimeOfDay::parse(&input.time_of_day)?;

    let checkin = MoodRepo::create(
        &state.pool,
        auth.user_id,
        mood.as_str(),
        time_of_day.as_str(),
        input.notes.as_deref(),
        Utc::now().date_naive(),
    )
    .await?;

    Ok(Json(DataResponse { data: checkin }))
}

/// Load one day's content bundle for a profile type. `None` when no
/// content row exists for the day.
async fn load_day_content(
    state: &AppState,
    day_number: i32,
    profile_type: &str,
) -> Result<Option<DayContent>, AppError> {
    let Some(daily) = ContentRepo::find_by_day(&state.pool, day_number).await? else {
        return Ok(None);
    };
    let tasks = ContentRepo::list_tasks(&state.pool, daily.id).await?;
    let profile_content =
        ContentRepo::find_profile_content(&state.pool, daily.id, profile_type).await?;
    Ok(Some(DayContent {
        daily,
        tasks,
        profile_content,
    }))
}
