use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::metrics::{ActivityLevel, BodyMetrics, Gender, Goal, ProfileInputs};

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub age: i32,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: String,
    pub goal: String,
    pub bmi: f64,
    pub bmr: i32,
    pub tdee: i32,
    pub target_calories: i32,
    pub target_protein: i32,
    pub target_carbs: i32,
    pub target_fat: i32,
    pub updated_at: OffsetDateTime,
}

/// Biometric inputs plus the targets derived from them at last write.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub inputs: ProfileInputs,
    #[serde(flatten)]
    pub metrics: BodyMetrics,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            inputs: ProfileInputs {
                age: r.age,
                gender: Gender::parse(&r.gender),
                height: r.height_cm,
                weight: r.weight_kg,
                activity_level: ActivityLevel::parse(&r.activity_level),
                goal: Goal::parse(&r.goal),
            },
            metrics: BodyMetrics {
                bmi: r.bmi,
                bmr: r.bmr,
                tdee: r.tdee,
                target_calories: r.target_calories,
                target_protein: r.target_protein,
                target_carbs: r.target_carbs,
                target_fat: r.target_fat,
            },
            updated_at: r.updated_at,
        }
    }
}
