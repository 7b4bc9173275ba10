use serde::Deserialize;

use super::repo_types::Preferences;
use crate::meals::dto::normalize_tags;

const MEALS_PER_DAY: std::ops::RangeInclusive<i32> = 3..=5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreferencesRequest {
    pub diet_type: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default = "default_meals_per_day")]
    pub meals_per_day: i32,
}
fn default_meals_per_day() -> i32 {
    3
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub diet_type: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub meals_per_day: Option<i32>,
}

pub fn normalize_diet(diet: Option<String>) -> Option<String> {
    diet.map(|d| d.trim().to_lowercase()).filter(|d| !d.is_empty())
}

impl UpdatePreferencesRequest {
    pub fn merge_into(self, current: Preferences) -> Preferences {
        Preferences {
            diet_type: match self.diet_type {
                Some(d) => normalize_diet(Some(d)),
                None => current.diet_type,
            },
            allergies: self
                .allergies
                .map(|a| normalize_tags(&a))
                .unwrap_or(current.allergies),
            meals_per_day: self.meals_per_day.unwrap_or(current.meals_per_day),
            ..current
        }
    }
}

pub fn validate_meals_per_day(n: i32) -> Result<(), String> {
    if MEALS_PER_DAY.contains(&n) {
        Ok(())
    } else {
        Err(format!(
            "Meals per day must be between {} and {}",
            MEALS_PER_DAY.start(),
            MEALS_PER_DAY.end()
        ))
    }
}
