use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{
    normalize_diet, validate_meals_per_day, CreatePreferencesRequest, UpdatePreferencesRequest,
};
use super::repo_types::Preferences;
use super::store::PreferencesStore;
use crate::error::AppError;
use crate::meals::dto::normalize_tags;

#[instrument(skip(store))]
pub async fn get_preferences(
    store: &dyn PreferencesStore,
    user_id: Uuid,
) -> Result<Preferences, AppError> {
    store
        .find(user_id)
        .await?
        .ok_or(AppError::NotFound("Preferences"))
}

#[instrument(skip(store, req))]
pub async fn create_preferences(
    store: &dyn PreferencesStore,
    user_id: Uuid,
    req: CreatePreferencesRequest,
) -> Result<Preferences, AppError> {
    validate_meals_per_day(req.meals_per_day).map_err(AppError::InvalidInput)?;

    if store.find(user_id).await?.is_some() {
        warn!(%user_id, "preferences already exist");
        return Err(AppError::Conflict("Preferences already exist".into()));
    }

    let diet = normalize_diet(req.diet_type);
    let allergies = normalize_tags(&req.allergies);
    let prefs = store
        .insert(user_id, diet.as_deref(), &allergies, req.meals_per_day)
        .await?;
    info!(%user_id, diet = ?prefs.diet_type, allergies = prefs.allergies.len(), "preferences created");
    Ok(prefs)
}

#[instrument(skip(store, req))]
pub async fn update_preferences(
    store: &dyn PreferencesStore,
    user_id: Uuid,
    req: UpdatePreferencesRequest,
) -> Result<Preferences, AppError> {
    let current = get_preferences(store, user_id).await?;
    let merged = req.merge_into(current);
    validate_meals_per_day(merged.meals_per_day).map_err(AppError::InvalidInput)?;

    let updated = store
        .update(&merged)
        .await?
        .ok_or(AppError::NotFound("Preferences"))?;
    info!(%user_id, "preferences updated");
    Ok(updated)
}
