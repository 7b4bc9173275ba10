use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use super::repo_types::{MealPlan, NewMealPlan};
use crate::error::AppError;
use crate::meals::{MealType, ResolvedMeal};

/// Persistence for meal plans, unique per (user, date).
#[async_trait]
pub trait MealPlanStore: Send + Sync {
    async fn find(&self, user_id: Uuid, date: Date) -> Result<Option<MealPlan>, AppError>;

    /// Fails with `AppError::Conflict` when the user already has a plan that day.
    async fn insert(&self, plan: NewMealPlan) -> Result<MealPlan, AppError>;

    /// Remove any plan for the same (user, date) and insert `plan`, atomically.
    async fn replace(&self, plan: NewMealPlan) -> Result<MealPlan, AppError>;

    async fn set_slot(
        &self,
        user_id: Uuid,
        date: Date,
        meal_type: MealType,
        meal_id: Uuid,
    ) -> Result<Option<MealPlan>, AppError>;

    async fn delete(&self, user_id: Uuid, date: Date) -> Result<bool, AppError>;
}

/// Read access to meals with their ingredients resolved.
#[async_trait]
pub trait MealCatalog: Send + Sync {
    /// Every meal tagged with `meal_type`.
    async fn candidates(&self, meal_type: MealType) -> Result<Vec<ResolvedMeal>, AppError>;

    /// Meals with the given ids; unknown ids are skipped.
    async fn resolve(&self, ids: &[Uuid]) -> Result<Vec<ResolvedMeal>, AppError>;
}
