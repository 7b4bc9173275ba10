use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Preferences;
use super::store::PreferencesStore;
use crate::error::AppError;

const COLUMNS: &str = "id, user_id, diet_type, allergies, meals_per_day";

impl Preferences {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> Result<Option<Preferences>, sqlx::Error> {
        sqlx::query_as::<_, Preferences>(&format!(
            "SELECT {COLUMNS} FROM preferences WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        diet_type: Option<&str>,
        allergies: &[String],
        meals_per_day: i32,
    ) -> Result<Preferences, sqlx::Error> {
        sqlx::query_as::<_, Preferences>(&format!(
            r#"
            INSERT INTO preferences (user_id, diet_type, allergies, meals_per_day)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(diet_type)
        .bind(allergies)
        .bind(meals_per_day)
        .fetch_one(db)
        .await
    }

    pub async fn update(db: &PgPool, prefs: &Preferences) -> Result<Option<Preferences>, sqlx::Error> {
        sqlx::query_as::<_, Preferences>(&format!(
            r#"
            UPDATE preferences
               SET diet_type = $2, allergies = $3, meals_per_day = $4
             WHERE user_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(prefs.user_id)
        .bind(prefs.diet_type.as_deref())
        .bind(&prefs.allergies)
        .bind(prefs.meals_per_day)
        .fetch_optional(db)
        .await
    }
}

/// `PreferencesStore` backed by the `preferences` table.
#[derive(Clone)]
pub struct PgPreferencesStore {
    db: PgPool,
}

impl PgPreferencesStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferencesStore for PgPreferencesStore {
    async fn find(&self, user_id: Uuid) -> Result<Option<Preferences>, AppError> {
        Ok(Preferences::find_by_user(&self.db, user_id).await?)
    }

    async fn insert(
        &self,
        user_id: Uuid,
        diet_type: Option<&str>,
        allergies: &[String],
        meals_per_day: i32,
    ) -> Result<Preferences, AppError> {
        Preferences::insert(&self.db, user_id, diet_type, allergies, meals_per_day)
            .await
            .map_err(|e| AppError::on_write(e, "Preferences already exist"))
    }

    async fn update(&self, prefs: &Preferences) -> Result<Option<Preferences>, AppError> {
        Ok(Preferences::update(&self.db, prefs).await?)
    }
}
