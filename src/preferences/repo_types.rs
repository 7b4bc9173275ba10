use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::meals::Meal;

/// Diet used when the user has not chosen one; matches every meal.
pub const STANDARD_DIET: &str = "standard";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub id: Uuid,
    pub user_id: Uuid,
    pub diet_type: Option<String>,
    pub allergies: Vec<String>,
    pub meals_per_day: i32,
}

impl Preferences {
    /// A meal is allowed when it carries the chosen diet tag (if any) and
    /// declares itself free of every allergen the user listed.
    pub fn allows(&self, meal: &Meal) -> bool {
        let diet_ok = match self.diet_type.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(diet) if diet.eq_ignore_ascii_case(STANDARD_DIET) => true,
            Some(diet) => meal.diet_types.iter().any(|d| d.eq_ignore_ascii_case(diet)),
        };
        diet_ok
            && self.allergies.iter().all(|allergy| {
                meal.excludes_allergens
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(allergy.trim()))
            })
    }
}

/// Users without preferences see the whole catalog.
pub fn matches_preferences(meal: &Meal, prefs: Option<&Preferences>) -> bool {
    prefs.map_or(true, |p| p.allows(meal))
}
