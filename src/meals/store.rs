use async_trait::async_trait;
use uuid::Uuid;

use super::dto::IngredientAmount;
use super::repo_types::{MealType, ResolvedMeal};
use crate::error::AppError;

/// Field values written on insert and update.
#[derive(Debug)]
pub struct MealWrite<'a> {
    pub name: &'a str,
    pub meal_types: Vec<String>,
    pub instructions: &'a [String],
    pub diet_types: &'a [String],
    pub excludes_allergens: &'a [String],
    pub image_url: Option<&'a str>,
}

/// Persistence for meals and their ordered recipe lines.
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Meals matching both filters when given, ordered by name.
    async fn list(
        &self,
        meal_type: Option<MealType>,
        diet_type: Option<&str>,
    ) -> Result<Vec<ResolvedMeal>, AppError>;

    async fn find(&self, id: Uuid) -> Result<Option<ResolvedMeal>, AppError>;

    /// Store the meal and its lines atomically. Fails with
    /// `AppError::InvalidInput` when a line points at a missing ingredient.
    async fn insert(
        &self,
        meal: &MealWrite<'_>,
        lines: &[IngredientAmount],
    ) -> Result<Uuid, AppError>;

    /// Overwrite the meal's fields, and its lines when `lines` is given.
    /// Returns `false` when no meal has this id.
    async fn update(
        &self,
        id: Uuid,
        meal: &MealWrite<'_>,
        lines: Option<&[IngredientAmount]>,
    ) -> Result<bool, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
