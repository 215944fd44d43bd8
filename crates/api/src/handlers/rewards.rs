//! Handler for the `/rewards` resource.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use slimpath_core::error::CoreError;
use slimpath_db::models::bonus::BonusContent;
use slimpath_db::repositories::{BonusRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A bonus item annotated with the caller's unlock state.
#[derive(Debug, Serialize)]
pub struct RewardView {
    #[serde(flatten)]
    pub bonus: BonusContent,
    pub unlocked: bool,
}

/// The rewards screen payload.
#[derive(Debug, Serialize)]
pub struct RewardsResponse {
    pub slim_points: i32,
    pub bonus_unlocked: bool,
    pub rewards: Vec<RewardView>,
}

/// GET /api/v1/rewards
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RewardsResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            key: auth.user_id.to_string(),
        })?;

    let unlocked_ids = BonusRepo::unlocked_ids(&state.pool, user.id).await?;
    let rewards = BonusRepo::list_active(&state.pool)
        .await?
        .into_iter()
        .map(|bonus| RewardView {
            unlocked: unlocked_ids.contains(&bonus.id),
            bonus,
        })
        .collect();

    Ok(Json(DataResponse {
        data: RewardsResponse {
            slim_points: user.slim_points,
            bonus_unlocked: user.bonus_unlocked,
            rewards,
        },
    }))
}
