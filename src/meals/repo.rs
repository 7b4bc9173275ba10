use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::dto::IngredientAmount;
use super::repo_types::{MealIngredientRow, MealRow, MealType, ResolvedMeal};
use super::store::{MealStore, MealWrite};
use crate::error::AppError;
use crate::meal_plans::MealCatalog;

const MEAL_COLUMNS: &str = "id, name, meal_types, instructions, diet_types, \
                            excludes_allergens, image_url, created_at";
const UNKNOWN_INGREDIENT: &str = "Meal references an unknown ingredient";

pub async fn list(
    db: &PgPool,
    meal_type: Option<MealType>,
    diet_type: Option<&str>,
) -> Result<Vec<MealRow>, sqlx::Error> {
    sqlx::query_as::<_, MealRow>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
          FROM meals
         WHERE ($1::text IS NULL OR $1 = ANY(meal_types))
           AND ($2::text IS NULL OR $2 = ANY(diet_types))
         ORDER BY name
        "#
    ))
    .bind(meal_type.map(|t| t.as_str()))
    .bind(diet_type)
    .fetch_all(db)
    .await
}

pub async fn find_by_ids(db: &PgPool, ids: &[Uuid]) -> Result<Vec<MealRow>, sqlx::Error> {
    sqlx::query_as::<_, MealRow>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = ANY($1) ORDER BY name"
    ))
    .bind(ids)
    .fetch_all(db)
    .await
}

/// Recipe lines for the given meals, joined to their ingredients.
pub async fn lines_for(
    db: &PgPool,
    meal_ids: &[Uuid],
) -> Result<Vec<MealIngredientRow>, sqlx::Error> {
    sqlx::query_as::<_, MealIngredientRow>(
        r#"
        SELECT mi.meal_id, mi.amount,
               i.id, i.name, i.calories_per_100g, i.protein_per_100g,
               i.carbs_per_100g, i.fat_per_100g, i.unit
          FROM meal_ingredients mi
          JOIN ingredients i ON i.id = mi.ingredient_id
         WHERE mi.meal_id = ANY($1)
         ORDER BY mi.meal_id, mi.position
        "#,
    )
    .bind(meal_ids)
    .fetch_all(db)
    .await
}

/// Load meal rows together with their resolved ingredients.
pub async fn resolve(db: &PgPool, rows: Vec<MealRow>) -> Result<Vec<ResolvedMeal>, sqlx::Error> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let lines = lines_for(db, &ids).await?;
    Ok(ResolvedMeal::assemble(rows, lines))
}

pub async fn insert_tx(
    tx: &mut Transaction<'_, Postgres>,
    meal: &MealWrite<'_>,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO meals (name, meal_types, instructions, diet_types,
                           excludes_allergens, image_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(meal.name)
    .bind(&meal.meal_types)
    .bind(meal.instructions)
    .bind(meal.diet_types)
    .bind(meal.excludes_allergens)
    .bind(meal.image_url)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    meal: &MealWrite<'_>,
) -> Result<bool, sqlx::Error> {
    let res = sqlx::query(
        r#"
        UPDATE meals
           SET name = $2, meal_types = $3, instructions = $4, diet_types = $5,
               excludes_allergens = $6, image_url = $7
         WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(meal.name)
    .bind(&meal.meal_types)
    .bind(meal.instructions)
    .bind(meal.diet_types)
    .bind(meal.excludes_allergens)
    .bind(meal.image_url)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected() > 0)
}

/// Replace the recipe lines of a meal, keeping the given order.
pub async fn replace_lines_tx(
    tx: &mut Transaction<'_, Postgres>,
    meal_id: Uuid,
    lines: &[IngredientAmount],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM meal_ingredients WHERE meal_id = $1")
        .bind(meal_id)
        .execute(&mut **tx)
        .await?;
    for (position, line) in lines.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO meal_ingredients (meal_id, position, ingredient_id, amount)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(meal_id)
        .bind(position as i32)
        .bind(line.ingredient_id)
        .bind(line.amount)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let res = sqlx::query("DELETE FROM meals WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// Meals backed by the `meals` and `meal_ingredients` tables.
#[derive(Clone)]
pub struct PgMealStore {
    db: PgPool,
}

impl PgMealStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealStore for PgMealStore {
    async fn list(
        &self,
        meal_type: Option<MealType>,
        diet_type: Option<&str>,
    ) -> Result<Vec<ResolvedMeal>, AppError> {
        let rows = list(&self.db, meal_type, diet_type).await?;
        Ok(resolve(&self.db, rows).await?)
    }

    async fn find(&self, id: Uuid) -> Result<Option<ResolvedMeal>, AppError> {
        let rows = find_by_ids(&self.db, &[id]).await?;
        Ok(resolve(&self.db, rows).await?.into_iter().next())
    }

    async fn insert(
        &self,
        meal: &MealWrite<'_>,
        lines: &[IngredientAmount],
    ) -> Result<Uuid, AppError> {
        let mut tx = self.db.begin().await?;
        let id = insert_tx(&mut tx, meal).await?;
        replace_lines_tx(&mut tx, id, lines)
            .await
            .map_err(|e| AppError::on_reference(e, UNKNOWN_INGREDIENT))?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update(
        &self,
        id: Uuid,
        meal: &MealWrite<'_>,
        lines: Option<&[IngredientAmount]>,
    ) -> Result<bool, AppError> {
        let mut tx = self.db.begin().await?;
        if !update_tx(&mut tx, id, meal).await? {
            return Ok(false);
        }
        if let Some(lines) = lines {
            replace_lines_tx(&mut tx, id, lines)
                .await
                .map_err(|e| AppError::on_reference(e, UNKNOWN_INGREDIENT))?;
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(delete(&self.db, id).await?)
    }
}

#[async_trait]
impl MealCatalog for PgMealStore {
    async fn candidates(&self, meal_type: MealType) -> Result<Vec<ResolvedMeal>, AppError> {
        MealStore::list(self, Some(meal_type), None).await
    }

    async fn resolve(&self, ids: &[Uuid]) -> Result<Vec<ResolvedMeal>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = find_by_ids(&self.db, ids).await?;
        Ok(resolve(&self.db, rows).await?)
    }
}
