use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::ingredients::Ingredient;
use crate::nutrition::{calculate_meal_nutrition, MealIngredient, Nutrition};

/// Slot of the day a meal can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            _ => None,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub name: String,
    pub meal_types: Vec<String>,
    pub instructions: Vec<String>,
    pub diet_types: Vec<String>,
    pub excludes_allergens: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct MealIngredientRow {
    pub meal_id: Uuid,
    pub amount: f64,
    #[sqlx(flatten)]
    pub ingredient: Ingredient,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub meal_types: Vec<MealType>,
    pub instructions: Vec<String>,
    pub diet_types: Vec<String>,
    pub excludes_allergens: Vec<String>,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<MealRow> for Meal {
    fn from(r: MealRow) -> Self {
        let meal_types = r
            .meal_types
            .iter()
            .filter_map(|t| {
                let parsed = MealType::parse(t);
                if parsed.is_none() {
                    warn!(meal_id = %r.id, tag = %t, "ignoring unknown meal type");
                }
                parsed
            })
            .collect();
        Self {
            id: r.id,
            name: r.name,
            meal_types,
            instructions: r.instructions,
            diet_types: r.diet_types,
            excludes_allergens: r.excludes_allergens,
            image_url: r.image_url,
            created_at: r.created_at,
        }
    }
}

/// A meal with its recipe lines joined to full ingredient records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMeal {
    #[serde(flatten)]
    pub meal: Meal,
    pub ingredients: Vec<MealIngredient>,
}

impl ResolvedMeal {
    /// Derived from current ingredient values on every call.
    pub fn nutrition(&self) -> Nutrition {
        calculate_meal_nutrition(&self.ingredients)
    }

    /// Attach ingredient rows (ordered by position) to their meals.
    pub fn assemble(meals: Vec<MealRow>, lines: Vec<MealIngredientRow>) -> Vec<ResolvedMeal> {
        let mut resolved: Vec<ResolvedMeal> = meals
            .into_iter()
            .map(|m| ResolvedMeal {
                meal: m.into(),
                ingredients: Vec::new(),
            })
            .collect();
        for line in lines {
            if let Some(target) = resolved.iter_mut().find(|r| r.meal.id == line.meal_id) {
                target.ingredients.push(MealIngredient {
                    ingredient: line.ingredient,
                    amount: line.amount,
                });
            }
        }
        resolved
    }
}
