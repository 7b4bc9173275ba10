use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db;
use crate::ingredients::{IngredientStore, PgIngredientStore};
use crate::meal_plans::{MealCatalog, MealPlanStore, PgMealPlanStore};
use crate::meals::{MealStore, PgMealStore};
use crate::preferences::{PgPreferencesStore, PreferencesStore};
use crate::profiles::{PgProfileStore, ProfileStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub ingredients: Arc<dyn IngredientStore>,
    pub meals: Arc<dyn MealStore>,
    pub catalog: Arc<dyn MealCatalog>,
    pub profiles: Arc<dyn ProfileStore>,
    pub preferences: Arc<dyn PreferencesStore>,
    pub plans: Arc<dyn MealPlanStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config).await?;
        Ok(Self::from_pool(db, config))
    }

    /// Wire the Postgres-backed stores onto an existing pool.
    pub fn from_pool(db: PgPool, config: Arc<AppConfig>) -> Self {
        let meals = Arc::new(PgMealStore::new(db.clone()));
        Self {
            ingredients: Arc::new(PgIngredientStore::new(db.clone())),
            meals: meals.clone(),
            catalog: meals,
            profiles: Arc::new(PgProfileStore::new(db.clone())),
            preferences: Arc::new(PgPreferencesStore::new(db.clone())),
            plans: Arc::new(PgMealPlanStore::new(db.clone())),
            db,
            config,
        }
    }
}
