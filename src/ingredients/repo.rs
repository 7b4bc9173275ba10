use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Ingredient;
use super::store::IngredientStore;
use crate::error::AppError;

const COLUMNS: &str =
    "id, name, calories_per_100g, protein_per_100g, carbs_per_100g, fat_per_100g, unit";

impl Ingredient {
    pub async fn list(db: &PgPool) -> Result<Vec<Ingredient>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(&format!(
            "SELECT {COLUMNS} FROM ingredients ORDER BY name"
        ))
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Ingredient>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(&format!(
            "SELECT {COLUMNS} FROM ingredients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_name(db: &PgPool, name: &str) -> Result<Option<Ingredient>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(&format!(
            "SELECT {COLUMNS} FROM ingredients WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(db)
        .await
    }

    /// Ids from `ids` that have no ingredient row.
    pub async fn missing_ids(db: &PgPool, ids: &[Uuid]) -> Result<Vec<Uuid>, sqlx::Error> {
        let found: Vec<Uuid> =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM ingredients WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(db)
                .await?;
        Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
    }

    pub async fn insert(db: &PgPool, new: &Ingredient) -> Result<Ingredient, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(&format!(
            r#"
            INSERT INTO ingredients (name, calories_per_100g, protein_per_100g,
                                     carbs_per_100g, fat_per_100g, unit)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&new.name)
        .bind(new.calories_per_100g)
        .bind(new.protein_per_100g)
        .bind(new.carbs_per_100g)
        .bind(new.fat_per_100g)
        .bind(&new.unit)
        .fetch_one(db)
        .await
    }

    pub async fn update(db: &PgPool, ingredient: &Ingredient) -> Result<Option<Ingredient>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(&format!(
            r#"
            UPDATE ingredients
               SET name = $2, calories_per_100g = $3, protein_per_100g = $4,
                   carbs_per_100g = $5, fat_per_100g = $6, unit = $7
             WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(ingredient.id)
        .bind(&ingredient.name)
        .bind(ingredient.calories_per_100g)
        .bind(ingredient.protein_per_100g)
        .bind(ingredient.carbs_per_100g)
        .bind(ingredient.fat_per_100g)
        .bind(&ingredient.unit)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

/// `IngredientStore` backed by the `ingredients` table.
#[derive(Clone)]
pub struct PgIngredientStore {
    db: PgPool,
}

impl PgIngredientStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IngredientStore for PgIngredientStore {
    async fn list(&self) -> Result<Vec<Ingredient>, AppError> {
        Ok(Ingredient::list(&self.db).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, AppError> {
        Ok(Ingredient::find_by_id(&self.db, id).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, AppError> {
        Ok(Ingredient::find_by_name(&self.db, name).await?)
    }

    async fn missing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, AppError> {
        Ok(Ingredient::missing_ids(&self.db, ids).await?)
    }

    async fn insert(&self, new: &Ingredient) -> Result<Ingredient, AppError> {
        Ingredient::insert(&self.db, new)
            .await
            .map_err(|e| AppError::on_write(e, "Ingredient already exists"))
    }

    async fn update(&self, ingredient: &Ingredient) -> Result<Option<Ingredient>, AppError> {
        Ingredient::update(&self.db, ingredient)
            .await
            .map_err(|e| AppError::on_write(e, "Ingredient name already taken"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ingredient::delete(&self.db, id)
            .await
            .map_err(|e| AppError::on_delete(e, "Ingredient is used by a meal"))
    }
}
