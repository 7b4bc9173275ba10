use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::repo_types::{Meal, MealType, ResolvedMeal};
use crate::nutrition::{MealIngredient, Nutrition};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientAmount {
    pub ingredient_id: Uuid,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub name: String,
    pub meal_type: Vec<MealType>,
    pub ingredients: Vec<IngredientAmount>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub diet_types: Vec<String>,
    #[serde(default)]
    pub excludes_allergens: Vec<String>,
    pub image_url: Option<String>,
}

/// Partial update. A provided ingredient list replaces the stored one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub meal_type: Option<Vec<MealType>>,
    pub ingredients: Option<Vec<IngredientAmount>>,
    pub instructions: Option<Vec<String>>,
    pub diet_types: Option<Vec<String>>,
    pub excludes_allergens: Option<Vec<String>>,
    /// `Some(None)` (an explicit `null`) clears the image; absent keeps it.
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

/// Tell an explicit `null` apart from a missing field.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFilter {
    pub meal_type: Option<MealType>,
    pub diet_type: Option<String>,
}

/// Meal as returned to callers, with nutrition derived at read time.
#[derive(Debug, Clone, Serialize)]
pub struct MealDetails {
    #[serde(flatten)]
    pub meal: Meal,
    pub ingredients: Vec<MealIngredient>,
    pub nutrition: Nutrition,
}

impl From<ResolvedMeal> for MealDetails {
    fn from(r: ResolvedMeal) -> Self {
        let nutrition = r.nutrition();
        Self {
            meal: r.meal,
            ingredients: r.ingredients,
            nutrition,
        }
    }
}

/// Lowercase, trim, drop blanks and duplicates.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

pub fn meal_type_tags(types: &[MealType]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in types {
        let s = t.as_str().to_string();
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

pub fn validate_meal(
    name: &str,
    meal_types: &[MealType],
    ingredients: &[IngredientAmount],
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Meal name is required".into());
    }
    if meal_types.is_empty() {
        return Err("At least one meal type is required".into());
    }
    if ingredients.is_empty() {
        return Err("At least one ingredient is required".into());
    }
    if ingredients
        .iter()
        .any(|i| !i.amount.is_finite() || i.amount <= 0.0)
    {
        return Err("Ingredient amounts must be positive".into());
    }
    Ok(())
}
