use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{
    meal_type_tags, normalize_tags, validate_meal, CreateMealRequest, IngredientAmount,
    MealDetails, MealFilter, UpdateMealRequest,
};
use super::repo_types::{MealType, ResolvedMeal};
use super::store::{MealStore, MealWrite};
use crate::error::AppError;
use crate::ingredients::IngredientStore;

#[instrument(skip(meals))]
pub async fn list_meals(
    meals: &dyn MealStore,
    filter: &MealFilter,
) -> Result<Vec<MealDetails>, AppError> {
    let diet = filter
        .diet_type
        .as_deref()
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty());
    let resolved = meals.list(filter.meal_type, diet.as_deref()).await?;
    Ok(resolved.into_iter().map(MealDetails::from).collect())
}

async fn load_resolved(meals: &dyn MealStore, id: Uuid) -> Result<ResolvedMeal, AppError> {
    meals.find(id).await?.ok_or(AppError::NotFound("Meal"))
}

#[instrument(skip(meals))]
pub async fn get_meal(meals: &dyn MealStore, id: Uuid) -> Result<MealDetails, AppError> {
    Ok(load_resolved(meals, id).await?.into())
}

async fn ensure_ingredients_exist(
    ingredients: &dyn IngredientStore,
    lines: &[IngredientAmount],
) -> Result<(), AppError> {
    let ids: Vec<Uuid> = lines.iter().map(|l| l.ingredient_id).collect();
    let missing = ingredients.missing_ids(&ids).await?;
    if let Some(first) = missing.first() {
        warn!(ingredient_id = %first, "meal references unknown ingredient");
        return Err(AppError::InvalidInput(format!(
            "Ingredient {} not found",
            first
        )));
    }
    Ok(())
}

#[instrument(skip(meals, ingredients, req), fields(name = %req.name))]
pub async fn create_meal(
    meals: &dyn MealStore,
    ingredients: &dyn IngredientStore,
    req: CreateMealRequest,
) -> Result<MealDetails, AppError> {
    validate_meal(&req.name, &req.meal_type, &req.ingredients).map_err(AppError::InvalidInput)?;
    ensure_ingredients_exist(ingredients, &req.ingredients).await?;

    let diet_types = normalize_tags(&req.diet_types);
    let excludes_allergens = normalize_tags(&req.excludes_allergens);
    let write = MealWrite {
        name: req.name.trim(),
        meal_types: meal_type_tags(&req.meal_type),
        instructions: &req.instructions,
        diet_types: &diet_types,
        excludes_allergens: &excludes_allergens,
        image_url: req.image_url.as_deref(),
    };

    let meal_id = meals.insert(&write, &req.ingredients).await?;
    info!(%meal_id, "meal created");
    get_meal(meals, meal_id).await
}

#[instrument(skip(meals, ingredients, req))]
pub async fn update_meal(
    meals: &dyn MealStore,
    ingredients: &dyn IngredientStore,
    id: Uuid,
    req: UpdateMealRequest,
) -> Result<MealDetails, AppError> {
    let current = load_resolved(meals, id).await?;

    let name = req.name.unwrap_or(current.meal.name);
    let meal_types: Vec<MealType> = req.meal_type.unwrap_or(current.meal.meal_types);
    let lines: Vec<IngredientAmount> = match &req.ingredients {
        Some(lines) => lines.clone(),
        None => current
            .ingredients
            .iter()
            .map(|l| IngredientAmount {
                ingredient_id: l.ingredient.id,
                amount: l.amount,
            })
            .collect(),
    };
    validate_meal(&name, &meal_types, &lines).map_err(AppError::InvalidInput)?;
    if req.ingredients.is_some() {
        ensure_ingredients_exist(ingredients, &lines).await?;
    }

    let instructions = req.instructions.unwrap_or(current.meal.instructions);
    let diet_types = normalize_tags(&req.diet_types.unwrap_or(current.meal.diet_types));
    let excludes_allergens =
        normalize_tags(&req.excludes_allergens.unwrap_or(current.meal.excludes_allergens));
    let image_url = match req.image_url {
        Some(new) => new,
        None => current.meal.image_url,
    };
    let write = MealWrite {
        name: name.trim(),
        meal_types: meal_type_tags(&meal_types),
        instructions: &instructions,
        diet_types: &diet_types,
        excludes_allergens: &excludes_allergens,
        image_url: image_url.as_deref(),
    };

    let replaced_lines = req.ingredients.as_ref().map(|_| lines.as_slice());
    if !meals.update(id, &write, replaced_lines).await? {
        return Err(AppError::NotFound("Meal"));
    }

    info!(meal_id = %id, "meal updated");
    get_meal(meals, id).await
}

#[instrument(skip(meals))]
pub async fn delete_meal(meals: &dyn MealStore, id: Uuid) -> Result<(), AppError> {
    if !meals.delete(id).await? {
        return Err(AppError::NotFound("Meal"));
    }
    info!(meal_id = %id, "meal deleted");
    Ok(())
}
