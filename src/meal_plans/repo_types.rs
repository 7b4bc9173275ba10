use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::iso_date;
use crate::meals::MealType;

/// One user's meals for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "plan_date")]
    #[serde(with = "iso_date")]
    pub date: Date,
    pub breakfast_id: Option<Uuid>,
    pub lunch_id: Option<Uuid>,
    pub dinner_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl MealPlan {
    pub fn slot(&self, meal_type: MealType) -> Option<Uuid> {
        match meal_type {
            MealType::Breakfast => self.breakfast_id,
            MealType::Lunch => self.lunch_id,
            MealType::Dinner => self.dinner_id,
        }
    }

    pub fn set_slot(&mut self, meal_type: MealType, meal_id: Option<Uuid>) {
        match meal_type {
            MealType::Breakfast => self.breakfast_id = meal_id,
            MealType::Lunch => self.lunch_id = meal_id,
            MealType::Dinner => self.dinner_id = meal_id,
        }
    }

    /// Filled slots in breakfast, lunch, dinner order.
    pub fn meal_ids(&self) -> Vec<Uuid> {
        MealType::ALL.iter().filter_map(|t| self.slot(*t)).collect()
    }
}

/// Values for a plan that is about to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMealPlan {
    pub user_id: Uuid,
    pub date: Date,
    pub breakfast_id: Option<Uuid>,
    pub lunch_id: Option<Uuid>,
    pub dinner_id: Option<Uuid>,
}

impl NewMealPlan {
    pub fn meal_ids(&self) -> Vec<Uuid> {
        [self.breakfast_id, self.lunch_id, self.dinner_id]
            .into_iter()
            .flatten()
            .collect()
    }
}
