use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use time::Date;
use tracing::debug;
use uuid::Uuid;

use super::repo_types::{MealPlan, NewMealPlan};
use super::store::MealPlanStore;
use crate::error::AppError;
use crate::meals::MealType;

const COLUMNS: &str = "id, user_id, plan_date, breakfast_id, lunch_id, dinner_id, created_at";
const DUPLICATE: &str = "Meal plan already exists for this date";

/// `MealPlanStore` backed by the `meal_plans` table.
#[derive(Clone)]
pub struct PgMealPlanStore {
    db: PgPool,
}

impl PgMealPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

async fn insert_tx(
    tx: &mut Transaction<'_, Postgres>,
    plan: &NewMealPlan,
) -> Result<MealPlan, sqlx::Error> {
    sqlx::query_as::<_, MealPlan>(&format!(
        r#"
        INSERT INTO meal_plans (user_id, plan_date, breakfast_id, lunch_id, dinner_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(plan.user_id)
    .bind(plan.date)
    .bind(plan.breakfast_id)
    .bind(plan.lunch_id)
    .bind(plan.dinner_id)
    .fetch_one(&mut **tx)
    .await
}

fn slot_column(meal_type: MealType) -> &'static str {
    match meal_type {
        MealType::Breakfast => "breakfast_id",
        MealType::Lunch => "lunch_id",
        MealType::Dinner => "dinner_id",
    }
}

#[async_trait]
impl MealPlanStore for PgMealPlanStore {
    async fn find(&self, user_id: Uuid, date: Date) -> Result<Option<MealPlan>, AppError> {
        let plan = sqlx::query_as::<_, MealPlan>(&format!(
            "SELECT {COLUMNS} FROM meal_plans WHERE user_id = $1 AND plan_date = $2"
        ))
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;
        Ok(plan)
    }

    async fn insert(&self, plan: NewMealPlan) -> Result<MealPlan, AppError> {
        let mut tx = self.db.begin().await?;
        let created = insert_tx(&mut tx, &plan)
            .await
            .map_err(|e| AppError::on_write(e, DUPLICATE))?;
        tx.commit().await?;
        Ok(created)
    }

    async fn replace(&self, plan: NewMealPlan) -> Result<MealPlan, AppError> {
        let mut tx = self.db.begin().await?;
        let removed = sqlx::query("DELETE FROM meal_plans WHERE user_id = $1 AND plan_date = $2")
            .bind(plan.user_id)
            .bind(plan.date)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let created = insert_tx(&mut tx, &plan)
            .await
            .map_err(|e| AppError::on_write(e, DUPLICATE))?;
        tx.commit().await?;
        debug!(user_id = %plan.user_id, date = %plan.date, removed, "meal plan replaced");
        Ok(created)
    }

    async fn set_slot(
        &self,
        user_id: Uuid,
        date: Date,
        meal_type: MealType,
        meal_id: Uuid,
    ) -> Result<Option<MealPlan>, AppError> {
        let plan = sqlx::query_as::<_, MealPlan>(&format!(
            r#"
            UPDATE meal_plans
               SET {column} = $3
             WHERE user_id = $1 AND plan_date = $2
            RETURNING {COLUMNS}
            "#,
            column = slot_column(meal_type)
        ))
        .bind(user_id)
        .bind(date)
        .bind(meal_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(plan)
    }

    async fn delete(&self, user_id: Uuid, date: Date) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM meal_plans WHERE user_id = $1 AND plan_date = $2")
            .bind(user_id)
            .bind(date)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
