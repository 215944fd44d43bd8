//! Repository for the `user_onboarding` table.

use sqlx::PgPool;
use slimpath_core::types::UserId;

use crate::models::onboarding::{IntakeData, UserOnboarding};

const COLUMNS: &str = "id, user_id, age, height_cm, current_weight_kg, target_weight_kg, \
                       bmi, medications, physical_limitations, dietary_restrictions, \
                       diet_history, onboarding_completed, completed_at, created_at, updated_at";

/// Provides operations on intake records.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Ensure a blank record exists for the user without touching an
    /// existing one. Used by the webhook; failures there are non-fatal.
    pub async fn ensure_exists(pool: &PgPool, user_id: UserId) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_onboarding (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Get the record for a user, creating a blank one if absent.
    ///
    /// The no-op `DO UPDATE` guarantees `RETURNING` always produces a row.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<UserOnboarding, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_onboarding (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO UPDATE SET user_id = user_onboarding.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<UserOnboarding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_onboarding WHERE user_id = $1");
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Save intake data without changing completion state.
    pub async fn save_intake(
        pool: &PgPool,
        user_id: UserId,
        data: &IntakeData,
        bmi: Option<f64>,
    ) -> Result<UserOnboarding, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_onboarding (user_id, age, height_cm, current_weight_kg,
                                          target_weight_kg, bmi, medications,
                                          physical_limitations, dietary_restrictions, diet_history)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (user_id) DO UPDATE SET
                age = COALESCE(EXCLUDED.age, user_onboarding.age),
                height_cm = COALESCE(EXCLUDED.height_cm, user_onboarding.height_cm),
                current_weight_kg = COALESCE(EXCLUDED.current_weight_kg, user_onboarding.current_weight_kg),
                target_weight_kg = COALESCE(EXCLUDED.target_weight_kg, user_onboarding.target_weight_kg),
                bmi = COALESCE(EXCLUDED.bmi, user_onboarding.bmi),
                medications = CASE WHEN cardinality(EXCLUDED.medications) > 0
                                   THEN EXCLUDED.medications ELSE user_onboarding.medications END,
                physical_limitations = CASE WHEN cardinality(EXCLUDED.physical_limitations) > 0
                                            THEN EXCLUDED.physical_limitations ELSE user_onboarding.physical_limitations END,
                dietary_restrictions = CASE WHEN cardinality(EXCLUDED.dietary_restrictions) > 0
                                            THEN EXCLUDED.dietary_restrictions ELSE user_onboarding.dietary_restrictions END,
                diet_history = COALESCE(EXCLUDED.diet_history, user_onboarding.diet_history),
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .bind(data.age)
            .bind(data.height_cm)
            .bind(data.current_weight_kg)
            .bind(data.target_weight_kg)
            .bind(bmi)
            .bind(&data.medications)
            .bind(&data.physical_limitations)
            .bind(&data.dietary_restrictions)
            .bind(&data.diet_history)
            .fetch_one(pool)
            .await
    }

    /// Mark onboarding completed. Idempotent: a record that is already
    /// completed keeps its original `completed_at`.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<UserOnboarding, sqlx::Error> {
        let query = format!(
            "UPDATE user_onboarding SET
                onboarding_completed = TRUE,
                completed_at = COALESCE(completed_at, now()),
                updated_at = now()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
