//! Handlers for the `/admin` resource: CRUD over program content, daily
//! tasks, profile-specific content, bonus content, and the user list.
//!
//! Every handler takes the [`AdminUser`] extractor, which rejects
//! non-admin tokens with 403 before the handler body runs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use slimpath_core::error::CoreError;
use slimpath_core::profile::ProfileType;
use slimpath_core::program::PROGRAM_LENGTH_DAYS;
use slimpath_core::types::UserId;
use slimpath_db::models::bonus::{BonusContent, CreateBonusContent, UpdateBonusContent};
use slimpath_db::models::content::{
    CreateDailyContent, CreateDailyTask, CreateProfileContent, DailyContent, DailyTask,
    ProfileContent, UpdateDailyContent,
};
use slimpath_db::models::user::User;
use slimpath_db::repositories::{BonusRepo, ContentRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_day_number(day_number: i32) -> Result<(), CoreError> {
    if !(1..=PROGRAM_LENGTH_DAYS).contains(&day_number) {
        return Err(CoreError::Validation(format!(
            "day_number must be between 1 and {PROGRAM_LENGTH_DAYS}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Daily content
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/content
pub async fn list_content(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DailyContent>>>> {
    let content = ContentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: content }))
}

/// POST /api/v1/admin/content
///
/// A duplicate `day_number` surfaces as 409 via the unique constraint.
pub async fn create_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDailyContent>,
) -> AppResult<(StatusCode, Json<DataResponse<DailyContent>>)> {
    validate_day_number(input.day_number)?;
    let content = ContentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: content })))
}

/// GET /api/v1/admin/content/{id}
pub async fn get_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<DataResponse<DailyContent>>> {
    let content = ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "daily_content",
            key: id.to_string(),
        })?;
    Ok(Json(DataResponse { data: content }))
}

/// PUT /api/v1/admin/content/{id}
pub async fn update_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateDailyContent>,
) -> AppResult<Json<DataResponse<DailyContent>>> {
    if let Some(day) = input.day_number {
        validate_day_number(day)?;
    }
    let content = ContentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "daily_content",
            key: id.to_string(),
        })?;
    Ok(Json(DataResponse { data: content }))
}

/// DELETE /api/v1/admin/content/{id}
pub async fn delete_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<StatusCode> {
    let deleted = ContentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "daily_content",
            key: id.to_string(),
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Daily tasks
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/tasks/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub task_text: Option<String>,
    pub task_order: Option<i32>,
}

/// GET /api/v1/admin/content/{id}/tasks
pub async fn list_tasks(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(content_id): Path<UserId>,
) -> AppResult<Json<DataResponse<Vec<DailyTask>>>> {
    let tasks = ContentRepo::list_tasks(&state.pool, content_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/admin/content/{id}/tasks
pub async fn create_task(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(content_id): Path<UserId>,
    Json(input): Json<CreateDailyTask>,
) -> AppResult<(StatusCode, Json<DataResponse<DailyTask>>)> {
    // A helpful 404 instead of a raw foreign-key failure.
    ContentRepo::find_by_id(&state.pool, content_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "daily_content",
            key: content_id.to_string(),
        })?;
    let task = ContentRepo::create_task(&state.pool, content_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PUT /api/v1/admin/tasks/{id}
pub async fn update_task(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<Json<DataResponse<DailyTask>>> {
    let task = ContentRepo::update_task(
        &state.pool,
        id,
        input.task_text.as_deref(),
        input.task_order,
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "daily_task",
        key: id.to_string(),
    })?;
    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/admin/tasks/{id}
pub async fn delete_task(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<StatusCode> {
    let deleted = ContentRepo::delete_task(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "daily_task",
            key: id.to_string(),
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Profile content
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/profile-content/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileContentRequest {
    pub star_food_name: Option<String>,
    pub star_food_description: Option<String>,
    pub allowed_foods: Option<Vec<String>>,
}

/// GET /api/v1/admin/content/{id}/profile-content
pub async fn list_profile_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(content_id): Path<UserId>,
) -> AppResult<Json<DataResponse<Vec<ProfileContent>>>> {
    let content = ContentRepo::list_profile_content(&state.pool, content_id).await?;
    Ok(Json(DataResponse { data: content }))
}

/// POST /api/v1/admin/content/{id}/profile-content
///
/// A duplicate (content, profile_type) pair surfaces as 409.
pub async fn create_profile_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(content_id): Path<UserId>,
    Json(input): Json<CreateProfileContent>,
) -> AppResult<(StatusCode, Json<DataResponse<ProfileContent>>)> {
    ProfileType::parse(&input.profile_type)?;
    ContentRepo::find_by_id(&state.pool, content_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "daily_content",
            key: content_id.to_string(),
        })?;
    let content = ContentRepo::create_profile_content(&state.pool, content_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: content })))
}

/// PUT /api/v1/admin/profile-content/{id}
pub async fn update_profile_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateProfileContentRequest>,
) -> AppResult<Json<DataResponse<ProfileContent>>> {
    let content = ContentRepo::update_profile_content(
        &state.pool,
        id,
        input.star_food_name.as_deref(),
        input.star_food_description.as_deref(),
        input.allowed_foods.as_deref(),
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "profile_content",
        key: id.to_string(),
    })?;
    Ok(Json(DataResponse { data: content }))
}

/// DELETE /api/v1/admin/profile-content/{id}
pub async fn delete_profile_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<StatusCode> {
    let deleted = ContentRepo::delete_profile_content(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "profile_content",
            key: id.to_string(),
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Bonus content
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/bonus
pub async fn list_bonus(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BonusContent>>>> {
    let bonus = BonusRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: bonus }))
}

/// POST /api/v1/admin/bonus
pub async fn create_bonus(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBonusContent>,
) -> AppResult<(StatusCode, Json<DataResponse<BonusContent>>)> {
    let bonus = BonusRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: bonus })))
}

/// PUT /api/v1/admin/bonus/{id}
pub async fn update_bonus(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateBonusContent>,
) -> AppResult<Json<DataResponse<BonusContent>>> {
    let bonus = BonusRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "bonus_content",
            key: id.to_string(),
        })?;
    Ok(Json(DataResponse { data: bonus }))
}

/// DELETE /api/v1/admin/bonus/{id}
pub async fn delete_bonus(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<StatusCode> {
    let deleted = BonusRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "bonus_content",
            key: id.to_string(),
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}
