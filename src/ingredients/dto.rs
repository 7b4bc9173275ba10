use serde::Deserialize;
use uuid::Uuid;

use super::repo_types::Ingredient;

const UNITS: [&str; 3] = ["g", "ml", "item"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIngredientRequest {
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}
fn default_unit() -> String {
    "g".into()
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIngredientRequest {
    pub name: Option<String>,
    pub calories_per_100g: Option<f64>,
    pub protein_per_100g: Option<f64>,
    pub carbs_per_100g: Option<f64>,
    pub fat_per_100g: Option<f64>,
    pub unit: Option<String>,
}

impl CreateIngredientRequest {
    pub fn into_ingredient(self) -> Ingredient {
        Ingredient {
            id: Uuid::nil(),
            name: self.name.trim().to_string(),
            calories_per_100g: self.calories_per_100g,
            protein_per_100g: self.protein_per_100g,
            carbs_per_100g: self.carbs_per_100g,
            fat_per_100g: self.fat_per_100g,
            unit: self.unit.trim().to_ascii_lowercase(),
        }
    }
}

impl UpdateIngredientRequest {
    pub fn merge_into(self, current: Ingredient) -> Ingredient {
        Ingredient {
            id: current.id,
            name: self
                .name
                .map(|n| n.trim().to_string())
                .unwrap_or(current.name),
            calories_per_100g: self.calories_per_100g.unwrap_or(current.calories_per_100g),
            protein_per_100g: self.protein_per_100g.unwrap_or(current.protein_per_100g),
            carbs_per_100g: self.carbs_per_100g.unwrap_or(current.carbs_per_100g),
            fat_per_100g: self.fat_per_100g.unwrap_or(current.fat_per_100g),
            unit: self
                .unit
                .map(|u| u.trim().to_ascii_lowercase())
                .unwrap_or(current.unit),
        }
    }
}

/// Checks shared by create and update. Returns a user-facing message.
pub fn validate(ingredient: &Ingredient) -> Result<(), String> {
    if ingredient.name.is_empty() {
        return Err("Ingredient name is required".into());
    }
    let values = [
        ingredient.calories_per_100g,
        ingredient.protein_per_100g,
        ingredient.carbs_per_100g,
        ingredient.fat_per_100g,
    ];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err("Nutrition values must be non-negative numbers".into());
    }
    if !UNITS.contains(&ingredient.unit.as_str()) {
        return Err(format!("Unit must be one of {}", UNITS.join(", ")));
    }
    Ok(())
}
