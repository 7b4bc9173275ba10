use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::iso_date;
use super::repo_types::MealPlan;
use crate::meals::dto::MealDetails;
use crate::meals::MealType;
use crate::nutrition::Nutrition;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealPlanRequest {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub breakfast: Option<Uuid>,
    pub lunch: Option<Uuid>,
    pub dinner: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapMealRequest {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub slot: MealType,
    pub meal_id: Uuid,
}

/// A plan with its meals resolved and the day's totals.
#[derive(Debug, Clone, Serialize)]
pub struct MealPlanDetails {
    #[serde(flatten)]
    pub plan: MealPlan,
    pub breakfast: Option<MealDetails>,
    pub lunch: Option<MealDetails>,
    pub dinner: Option<MealDetails>,
    pub nutrition: Nutrition,
}

/// Result of asking for a generated plan.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateOutcome {
    Generated {
        plan: MealPlan,
        nutrition: Nutrition,
        score: f64,
    },
    /// The catalog could not produce an acceptable day for this user.
    NotEnoughMeals,
}

impl GenerateOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            GenerateOutcome::Generated { .. } => "Meal plan generated",
            GenerateOutcome::NotEnoughMeals => {
                "Not enough meals available to build a plan for your targets and preferences"
            }
        }
    }
}
