use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::ingredients::Ingredient;
use crate::metrics::{round_to, MacroTargets};

/// Macro totals for a meal or a whole day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Nutrition {
    /// Calories to whole kcal, macros to one decimal.
    pub fn rounded(self) -> Self {
        Self {
            calories: self.calories.round(),
            protein: round_to(self.protein, 1),
            carbs: round_to(self.carbs, 1),
            fat: round_to(self.fat, 1),
        }
    }

    /// Weighted absolute deviation from `targets`. Protein counts double and
    /// fat one and a half times; lower is better.
    pub fn deviation_score(&self, targets: &MacroTargets) -> f64 {
        (self.calories - targets.calories).abs()
            + 2.0 * (self.protein - targets.protein).abs()
            + (self.carbs - targets.carbs).abs()
            + 1.5 * (self.fat - targets.fat).abs()
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(self, rhs: Nutrition) -> Nutrition {
        Nutrition {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Nutrition>>(iter: I) -> Nutrition {
        iter.fold(Nutrition::default(), Add::add)
    }
}

/// One line of a meal's recipe with the ingredient already resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealIngredient {
    pub ingredient: Ingredient,
    /// grams, millilitres or item count, matching `ingredient.unit`
    pub amount: f64,
}

/// Sum per-100-unit ingredient values scaled by each amount.
pub fn calculate_meal_nutrition(items: &[MealIngredient]) -> Nutrition {
    items
        .iter()
        .map(|item| {
            let scale = item.amount / 100.0;
            let i = &item.ingredient;
            Nutrition {
                calories: i.calories_per_100g * scale,
                protein: i.protein_per_100g * scale,
                carbs: i.carbs_per_100g * scale,
                fat: i.fat_per_100g * scale,
            }
        })
        .sum::<Nutrition>()
        .rounded()
}
