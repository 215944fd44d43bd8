//! HTTP-level integration tests for the dashboard: daily view, task
//! toggling with point awards, threshold unlocks, and mood check-ins.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{assert_error, body_json, get_auth, member_token, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

use slimpath_core::types::UserId;
use slimpath_db::models::bonus::CreateBonusContent;
use slimpath_db::models::content::{CreateDailyContent, CreateDailyTask, CreateProfileContent};
use slimpath_db::models::identity::CreateIdentity;
use slimpath_db::models::user::UpsertUser;
use slimpath_db::repositories::{
    BonusRepo, ContentRepo, IdentityRepo, OnboardingRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a member whose onboarding is completed, ready for the dashboard.
async fn seed_active_member(pool: &PgPool, email: &str) -> UserId {
    let identity = IdentityRepo::create(
        pool,
        &CreateIdentity {
            email: email.to_string(),
            password_hash: None,
            confirmed: true,
        },
    )
    .await
    .unwrap();
    UserRepo::upsert_from_webhook(
        pool,
        &UpsertUser {
            id: identity.id,
            email: email.to_string(),
            full_name: Some("Active Member".to_string()),
            profile_type: "hormonal".to_string(),
            subscription_plan: "monthly".to_string(),
            subscription_end_date: Utc::now(),
            webhook_data: json!({}),
        },
    )
    .await
    .unwrap();
    OnboardingRepo::ensure_exists(pool, identity.id).await.unwrap();
    OnboardingRepo::mark_completed(pool, identity.id).await.unwrap();
    identity.id
}

/// Seed day-1 content with two tasks and hormonal profile content.
/// Returns the task ids in order.
async fn seed_day_one_content(pool: &PgPool) -> Vec<UserId> {
    let content = ContentRepo::create(
        pool,
        &CreateDailyContent {
            day_number: 1,
            lean_message: "Day one. Small steps.".to_string(),
            micro_challenge: "Drink a glass of water on waking".to_string(),
            panic_button_text: Some("Breathe. The craving passes.".to_string()),
            panic_button_audio_url: None,
        },
    )
    .await
    .unwrap();

    let mut task_ids = Vec::new();
    for (order, text) in ["Water before coffee", "10 minute walk"].iter().enumerate() {
        let task = ContentRepo::create_task(
            pool,
            content.id,
            &CreateDailyTask {
                task_text: text.to_string(),
                task_order: order as i32,
            },
        )
        .await
        .unwrap();
        task_ids.push(task.id);
    }

    ContentRepo::create_profile_content(
        pool,
        content.id,
        &CreateProfileContent {
            profile_type: "hormonal".to_string(),
            star_food_name: "Broccoli".to_string(),
            star_food_description: None,
            allowed_foods: vec!["eggs".to_string(), "salmon".to_string()],
        },
    )
    .await
    .unwrap();

    task_ids
}

async fn toggle(
    app: axum::Router,
    token: &str,
    task_id: UserId,
    completed: bool,
) -> serde_json::Value {
    let response = post_json_auth(
        app,
        "/api/v1/dashboard/tasks/toggle",
        token,
        json!({ "task_id": task_id, "completed": completed }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Dashboard view
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_requires_completed_onboarding(pool: PgPool) {
    let identity = IdentityRepo::create(
        &pool,
        &CreateIdentity {
            email: "fresh@x.com".to_string(),
            password_hash: None,
            confirmed: true,
        },
    )
    .await
    .unwrap();
    UserRepo::upsert_from_webhook(
        &pool,
        &UpsertUser {
            id: identity.id,
            email: "fresh@x.com".to_string(),
            full_name: None,
            profile_type: "cortisol".to_string(),
            subscription_plan: "monthly".to_string(),
            subscription_end_date: Utc::now(),
            webhook_data: json!({}),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let token = member_token(identity.id);

    let response = get_auth(app, "/api/v1/dashboard", &token).await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_returns_day_bundle(pool: PgPool) {
    let id = seed_active_member(&pool, "dash@x.com").await;
    seed_day_one_content(&pool).await;

    let app = common::build_test_app(pool);
    let token = member_token(id);

    let response = get_auth(app, "/api/v1/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["current_day"], 1);
    assert_eq!(data["content"]["day_number"], 1);
    assert_eq!(data["content"]["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(data["content"]["profile_content"]["star_food_name"], "Broccoli");
    assert_eq!(data["progress"]["tasks_total"], 2);
    assert_eq!(data["progress"]["completion_percentage"], 0);
    assert!(data["moods_today"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_day_is_computed_and_clamped(pool: PgPool) {
    let id = seed_active_member(&pool, "clamp@x.com").await;
    // Completion 45 days ago: past the program end, so day stays at 30.
    sqlx::query(
        "UPDATE user_onboarding SET completed_at = now() - interval '45 days' WHERE user_id = $1",
    )
    .bind(id)
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let token = member_token(id);

    let response = get_auth(app, "/api/v1/dashboard", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_day"], 30);

    // The cached column was synced too.
    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(user.current_day, 30);
}

// ---------------------------------------------------------------------------
// Task toggling and points
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_all_tasks_awards_one_point(pool: PgPool) {
    let id = seed_active_member(&pool, "points@x.com").await;
    let tasks = seed_day_one_content(&pool).await;
    let app = common::build_test_app(pool.clone());
    let token = member_token(id);

    let first = toggle(app.clone(), &token, tasks[0], true).await;
    assert_eq!(first["data"]["progress"]["completion_percentage"], 50);
    assert_eq!(first["data"]["point_earned"], false);
    assert_eq!(first["data"]["user"]["slim_points"], 0);

    let second = toggle(app.clone(), &token, tasks[1], true).await;
    assert_eq!(second["data"]["progress"]["completion_percentage"], 100);
    assert_eq!(second["data"]["point_earned"], true);
    assert_eq!(second["data"]["user"]["slim_points"], 1);

    // Unchecking does not claw the point back.
    let uncheck = toggle(app.clone(), &token, tasks[1], false).await;
    assert_eq!(uncheck["data"]["progress"]["completion_percentage"], 50);
    assert_eq!(uncheck["data"]["user"]["slim_points"], 1);

    // Re-completing does not pay out again.
    let recheck = toggle(app, &token, tasks[1], true).await;
    assert_eq!(recheck["data"]["point_earned"], false);
    assert_eq!(recheck["data"]["user"]["slim_points"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn crossing_threshold_unlocks_bonus(pool: PgPool) {
    let id = seed_active_member(&pool, "bonus@x.com").await;
    let tasks = seed_day_one_content(&pool).await;

    // One point short of the threshold.
    UserRepo::add_points(&pool, id, 39, false).await.unwrap();

    let bonus = BonusRepo::create(
        &pool,
        &CreateBonusContent {
            title: "Recipe pack".to_string(),
            description: None,
            content_type: "pdf".to_string(),
            content_url: None,
            unlock_points: 40,
            is_active: true,
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let token = member_token(id);

    toggle(app.clone(), &token, tasks[0], true).await;
    let last = toggle(app, &token, tasks[1], true).await;
    assert_eq!(last["data"]["user"]["slim_points"], 40);
    assert_eq!(last["data"]["bonus_unlocked"], true);
    assert_eq!(last["data"]["user"]["bonus_unlocked"], true);

    let unlocked = BonusRepo::unlocked_ids(&pool, id).await.unwrap();
    assert_eq!(unlocked, vec![bonus.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggling_unknown_task_is_rejected(pool: PgPool) {
    let id = seed_active_member(&pool, "badtask@x.com").await;
    seed_day_one_content(&pool).await;
    let app = common::build_test_app(pool);
    let token = member_token(id);

    let response = post_json_auth(
        app,
        "/api/v1/dashboard/tasks/toggle",
        &token,
        json!({ "task_id": uuid::Uuid::new_v4(), "completed": true }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Mood check-ins
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mood_checkin_is_recorded_and_listed(pool: PgPool) {
    let id = seed_active_member(&pool, "mood@x.com").await;
    seed_day_one_content(&pool).await;
    let app = common::build_test_app(pool);
    let token = member_token(id);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/dashboard/mood",
        &token,
        json!({ "mood": "tired", "time_of_day": "morning", "notes": "rough night" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let dashboard = get_auth(app, "/api/v1/dashboard", &token).await;
    let json = body_json(dashboard).await;
    let moods = json["data"]["moods_today"].as_array().unwrap();
    assert_eq!(moods.len(), 1);
    assert_eq!(moods[0]["mood"], "tired");
    assert_eq!(moods[0]["time_of_day"], "morning");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_mood_is_rejected(pool: PgPool) {
    let id = seed_active_member(&pool, "badmood@x.com").await;
    let app = common::build_test_app(pool);
    let token = member_token(id);

    let response = post_json_auth(
        app,
        "/api/v1/dashboard/mood",
        &token,
        json!({ "mood": "ecstatic", "time_of_day": "morning" }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}
