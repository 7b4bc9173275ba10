use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::Ingredient;
use crate::error::AppError;

/// Persistence for ingredients, unique by name.
#[async_trait]
pub trait IngredientStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Ingredient>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, AppError>;

    /// Ids from `ids` that have no stored ingredient.
    async fn missing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, AppError>;

    /// Fails with `AppError::Conflict` when the name is taken.
    async fn insert(&self, new: &Ingredient) -> Result<Ingredient, AppError>;

    /// Fails with `AppError::Conflict` when the new name is taken.
    async fn update(&self, ingredient: &Ingredient) -> Result<Option<Ingredient>, AppError>;

    /// Fails with `AppError::Conflict` while a meal still uses the ingredient.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
