use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::Preferences;
use crate::error::AppError;

/// Persistence for dietary preferences, one row per user.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    async fn find(&self, user_id: Uuid) -> Result<Option<Preferences>, AppError>;

    /// Fails with `AppError::Conflict` when the user already has preferences.
    async fn insert(
        &self,
        user_id: Uuid,
        diet_type: Option<&str>,
        allergies: &[String],
        meals_per_day: i32,
    ) -> Result<Preferences, AppError>;

    async fn update(&self, prefs: &Preferences) -> Result<Option<Preferences>, AppError>;
}
