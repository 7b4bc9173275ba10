use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Profile, ProfileRow};
use super::store::ProfileStore;
use crate::error::AppError;
use crate::metrics::{BodyMetrics, ProfileInputs};

const COLUMNS: &str = "id, user_id, age, gender, height_cm, weight_kg, activity_level, goal, \
                       bmi, bmr, tdee, target_calories, target_protein, target_carbs, \
                       target_fat, updated_at";

pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {COLUMNS} FROM profiles WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    inputs: &ProfileInputs,
    metrics: &BodyMetrics,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(&format!(
        r#"
        INSERT INTO profiles (user_id, age, gender, height_cm, weight_kg, activity_level, goal,
                              bmi, bmr, tdee, target_calories, target_protein, target_carbs,
                              target_fat)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(inputs.age)
    .bind(inputs.gender.as_str())
    .bind(inputs.height)
    .bind(inputs.weight)
    .bind(inputs.activity_level.as_str())
    .bind(inputs.goal.as_str())
    .bind(metrics.bmi)
    .bind(metrics.bmr)
    .bind(metrics.tdee)
    .bind(metrics.target_calories)
    .bind(metrics.target_protein)
    .bind(metrics.target_carbs)
    .bind(metrics.target_fat)
    .fetch_one(db)
    .await
}

pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    inputs: &ProfileInputs,
    metrics: &BodyMetrics,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(&format!(
        r#"
        UPDATE profiles
           SET age = $2, gender = $3, height_cm = $4, weight_kg = $5, activity_level = $6,
               goal = $7, bmi = $8, bmr = $9, tdee = $10, target_calories = $11,
               target_protein = $12, target_carbs = $13, target_fat = $14,
               updated_at = now()
         WHERE user_id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(inputs.age)
    .bind(inputs.gender.as_str())
    .bind(inputs.height)
    .bind(inputs.weight)
    .bind(inputs.activity_level.as_str())
    .bind(inputs.goal.as_str())
    .bind(metrics.bmi)
    .bind(metrics.bmr)
    .bind(metrics.tdee)
    .bind(metrics.target_calories)
    .bind(metrics.target_protein)
    .bind(metrics.target_carbs)
    .bind(metrics.target_fat)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let res = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// `ProfileStore` backed by the `profiles` table.
#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(find_by_user(&self.db, user_id).await?.map(Profile::from))
    }

    async fn insert(
        &self,
        user_id: Uuid,
        inputs: &ProfileInputs,
        metrics: &BodyMetrics,
    ) -> Result<Profile, AppError> {
        insert(&self.db, user_id, inputs, metrics)
            .await
            .map(Profile::from)
            .map_err(|e| AppError::on_write(e, "Profile already exists"))
    }

    async fn update(
        &self,
        user_id: Uuid,
        inputs: &ProfileInputs,
        metrics: &BodyMetrics,
    ) -> Result<Option<Profile>, AppError> {
        Ok(update(&self.db, user_id, inputs, metrics)
            .await?
            .map(Profile::from))
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(delete(&self.db, user_id).await?)
    }
}
