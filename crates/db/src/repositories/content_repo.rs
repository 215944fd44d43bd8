//! Repository for program content: `daily_content`, `daily_tasks`, and
//! `profile_content`.

use sqlx::PgPool;
use slimpath_core::types::UserId;

use crate::models::content::{
    CreateDailyContent, CreateDailyTask, CreateProfileContent, DailyContent, DailyTask,
    ProfileContent, UpdateDailyContent,
};

const CONTENT_COLUMNS: &str = "id, day_number, lean_message, micro_challenge, \
                               panic_button_text, panic_button_audio_url, created_at, updated_at";

const TASK_COLUMNS: &str = "id, daily_content_id, task_text, task_order, created_at";

const PROFILE_COLUMNS: &str = "id, daily_content_id, profile_type, star_food_name, \
                               star_food_description, allowed_foods, created_at";

/// Provides CRUD operations for program content.
pub struct ContentRepo;

impl ContentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateDailyContent,
    ) -> Result<DailyContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_content (day_number, lean_message, micro_challenge,
                                        panic_button_text, panic_button_audio_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {CONTENT_COLUMNS}"
        );
        sqlx::query_as::<_, DailyContent>(&query)
            .bind(input.day_number)
            .bind(&input.lean_message)
            .bind(&input.micro_challenge)
            .bind(&input.panic_button_text)
            .bind(&input.panic_button_audio_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: UserId,
    ) -> Result<Option<DailyContent>, sqlx::Error> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM daily_content WHERE id = $1");
        sqlx::query_as::<_, DailyContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_day(
        pool: &PgPool,
        day_number: i32,
    ) -> Result<Option<DailyContent>, sqlx::Error> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM daily_content WHERE day_number = $1");
        sqlx::query_as::<_, DailyContent>(&query)
            .bind(day_number)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<DailyContent>, sqlx::Error> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM daily_content ORDER BY day_number");
        sqlx::query_as::<_, DailyContent>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update content. Only non-`None` fields are applied. Returns `None`
    /// if no row with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: UserId,
        input: &UpdateDailyContent,
    ) -> Result<Option<DailyContent>, sqlx::Error> {
        let query = format!(
            "UPDATE daily_content SET
                day_number = COALESCE($2, day_number),
                lean_message = COALESCE($3, lean_message),
                micro_challenge = COALESCE($4, micro_challenge),
                panic_button_text = COALESCE($5, panic_button_text),
                panic_button_audio_url = COALESCE($6, panic_button_audio_url),
                updated_at = now()
             WHERE id = $1
             RETURNING {CONTENT_COLUMNS}"
        );
        sqlx::query_as::<_, DailyContent>(&query)
            .bind(id)
            .bind(input.day_number)
            .bind(&input.lean_message)
            .bind(&input.micro_challenge)
            .bind(&input.panic_button_text)
            .bind(&input.panic_button_audio_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a content row (tasks and profile content cascade).
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM daily_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- daily_tasks ---

    pub async fn create_task(
        pool: &PgPool,
        daily_content_id: UserId,
        input: &CreateDailyTask,
    ) -> Result<DailyTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_tasks (daily_content_id, task_text, task_order)
             VALUES ($1, $2, $3)
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, DailyTask>(&query)
            .bind(daily_content_id)
            .bind(&input.task_text)
            .bind(input.task_order)
            .fetch_one(pool)
            .await
    }

    pub async fn list_tasks(
        pool: &PgPool,
        daily_content_id: UserId,
    ) -> Result<Vec<DailyTask>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM daily_tasks
             WHERE daily_content_id = $1 ORDER BY task_order"
        );
        sqlx::query_as::<_, DailyTask>(&query)
            .bind(daily_content_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update_task(
        pool: &PgPool,
        id: UserId,
        task_text: Option<&str>,
        task_order: Option<i32>,
    ) -> Result<Option<DailyTask>, sqlx::Error> {
        let query = format!(
            "UPDATE daily_tasks SET
                task_text = COALESCE($2, task_text),
                task_order = COALESCE($3, task_order)
             WHERE id = $1
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, DailyTask>(&query)
            .bind(id)
            .bind(task_text)
            .bind(task_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_task(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM daily_tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- profile_content ---

    pub async fn create_profile_content(
        pool: &PgPool,
        daily_content_id: UserId,
        input: &CreateProfileContent,
    ) -> Result<ProfileContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO profile_content (daily_content_id, profile_type, star_food_name,
                                          star_food_description, allowed_foods)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, ProfileContent>(&query)
            .bind(daily_content_id)
            .bind(&input.profile_type)
            .bind(&input.star_food_name)
            .bind(&input.star_food_description)
            .bind(&input.allowed_foods)
            .fetch_one(pool)
            .await
    }

    pub async fn list_profile_content(
        pool: &PgPool,
        daily_content_id: UserId,
    ) -> Result<Vec<ProfileContent>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM profile_content
             WHERE daily_content_id = $1 ORDER BY profile_type"
        );
        sqlx::query_as::<_, ProfileContent>(&query)
            .bind(daily_content_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_profile_content(
        pool: &PgPool,
        daily_content_id: UserId,
        profile_type: &str,
    ) -> Result<Option<ProfileContent>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM profile_content
             WHERE daily_content_id = $1 AND profile_type = $2"
        );
        sqlx::query_as::<_, ProfileContent>(&query)
            .bind(daily_content_id)
            .bind(profile_type)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_profile_content(
        pool: &PgPool,
        id: UserId,
        star_food_name: Option<&str>,
        star_food_description: Option<&str>,
        allowed_foods: Option<&[String]>,
    ) -> Result<Option<ProfileContent>, sqlx::Error> {
        let query = format!(
            "UPDATE profile_content SET
                star_food_name = COALESCE($2, star_food_name),
                star_food_description = COALESCE($3, star_food_description),
                allowed_foods = COALESCE($4, allowed_foods)
             WHERE id = $1
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, ProfileContent>(&query)
            .bind(id)
            .bind(star_food_name)
            .bind(star_food_description)
            .bind(allowed_foods)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_profile_content(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profile_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
