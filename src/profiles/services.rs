use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{validate, CreateProfileRequest, UpdateProfileRequest};
use super::repo_types::Profile;
use super::store::ProfileStore;
use crate::error::AppError;
use crate::metrics::calculate_metrics;

#[instrument(skip(store))]
pub async fn get_profile(store: &dyn ProfileStore, user_id: Uuid) -> Result<Profile, AppError> {
    store
        .find(user_id)
        .await?
        .ok_or(AppError::NotFound("Profile"))
}

#[instrument(skip(store, inputs))]
pub async fn create_profile(
    store: &dyn ProfileStore,
    user_id: Uuid,
    inputs: CreateProfileRequest,
) -> Result<Profile, AppError> {
    validate(&inputs).map_err(AppError::InvalidInput)?;

    if store.find(user_id).await?.is_some() {
        warn!(%user_id, "profile already exists");
        return Err(AppError::Conflict("Profile already exists".into()));
    }

    let metrics = calculate_metrics(&inputs);
    let profile = store.insert(user_id, &inputs, &metrics).await?;
    info!(%user_id, target_calories = metrics.target_calories, "profile created");
    Ok(profile)
}

/// Merge the given inputs over the stored ones and recompute every target.
#[instrument(skip(store, req))]
pub async fn update_profile(
    store: &dyn ProfileStore,
    user_id: Uuid,
    req: UpdateProfileRequest,
) -> Result<Profile, AppError> {
    let current = get_profile(store, user_id).await?;
    let inputs = req.merge_into(current.inputs);
    validate(&inputs).map_err(AppError::InvalidInput)?;

    let metrics = calculate_metrics(&inputs);
    let profile = store
        .update(user_id, &inputs, &metrics)
        .await?
        .ok_or(AppError::NotFound("Profile"))?;
    info!(%user_id, target_calories = metrics.target_calories, "profile updated");
    Ok(profile)
}

#[instrument(skip(store))]
pub async fn delete_profile(store: &dyn ProfileStore, user_id: Uuid) -> Result<(), AppError> {
    if !store.delete(user_id).await? {
        return Err(AppError::NotFound("Profile"));
    }
    info!(%user_id, "profile deleted");
    Ok(())
}
