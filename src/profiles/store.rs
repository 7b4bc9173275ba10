use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::Profile;
use crate::error::AppError;
use crate::metrics::{BodyMetrics, ProfileInputs};

/// Persistence for profiles, one per user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Fails with `AppError::Conflict` when the user already has a profile.
    async fn insert(
        &self,
        user_id: Uuid,
        inputs: &ProfileInputs,
        metrics: &BodyMetrics,
    ) -> Result<Profile, AppError>;

    async fn update(
        &self,
        user_id: Uuid,
        inputs: &ProfileInputs,
        metrics: &BodyMetrics,
    ) -> Result<Option<Profile>, AppError>;

    async fn delete(&self, user_id: Uuid) -> Result<bool, AppError>;
}
