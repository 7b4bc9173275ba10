use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{validate, CreateIngredientRequest, UpdateIngredientRequest};
use super::repo_types::Ingredient;
use super::store::IngredientStore;
use crate::error::AppError;

#[instrument(skip(store))]
pub async fn list_ingredients(store: &dyn IngredientStore) -> Result<Vec<Ingredient>, AppError> {
    store.list().await
}

#[instrument(skip(store))]
pub async fn get_ingredient(store: &dyn IngredientStore, id: Uuid) -> Result<Ingredient, AppError> {
    store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Ingredient"))
}

#[instrument(skip(store, req))]
pub async fn create_ingredient(
    store: &dyn IngredientStore,
    req: CreateIngredientRequest,
) -> Result<Ingredient, AppError> {
    let new = req.into_ingredient();
    validate(&new).map_err(AppError::InvalidInput)?;

    if store.find_by_name(&new.name).await?.is_some() {
        warn!(name = %new.name, "ingredient already exists");
        return Err(AppError::Conflict("Ingredient already exists".into()));
    }

    let created = store.insert(&new).await?;
    info!(ingredient_id = %created.id, name = %created.name, "ingredient created");
    Ok(created)
}

#[instrument(skip(store, req))]
pub async fn update_ingredient(
    store: &dyn IngredientStore,
    id: Uuid,
    req: UpdateIngredientRequest,
) -> Result<Ingredient, AppError> {
    let current = get_ingredient(store, id).await?;
    let merged = req.merge_into(current);
    validate(&merged).map_err(AppError::InvalidInput)?;

    let updated = store
        .update(&merged)
        .await?
        .ok_or(AppError::NotFound("Ingredient"))?;
    info!(ingredient_id = %updated.id, "ingredient updated");
    Ok(updated)
}

#[instrument(skip(store))]
pub async fn delete_ingredient(store: &dyn IngredientStore, id: Uuid) -> Result<(), AppError> {
    if !store.delete(id).await? {
        return Err(AppError::NotFound("Ingredient"));
    }
    info!(ingredient_id = %id, "ingredient deleted");
    Ok(())
}
