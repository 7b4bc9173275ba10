//! Body metrics and daily energy/macro targets.
//!
//! BMR uses the Mifflin-St Jeor equation; targets are derived from TDEE plus
//! a goal offset, split into grams by a per-goal macro ratio table.

use serde::{Deserialize, Serialize};

/// kcal per gram of protein or carbohydrate.
const KCAL_PER_G_PROTEIN_CARBS: f64 = 4.0;
/// kcal per gram of fat.
const KCAL_PER_G_FAT: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
    #[default]
    #[serde(other)]
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Lenient parse; anything unrecognised is `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::Unspecified => "unspecified",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Unspecified,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary | ActivityLevel::Unspecified => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Fractions of daily calories per macronutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatios {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
            Goal::Unspecified => "unspecified",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "lose" => Goal::Lose,
            "maintain" => Goal::Maintain,
            "gain" => Goal::Gain,
            _ => Goal::Unspecified,
        }
    }

    /// Daily kcal adjustment applied on top of TDEE.
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Goal::Lose => -500.0,
            Goal::Gain => 500.0,
            Goal::Maintain | Goal::Unspecified => 0.0,
        }
    }

    pub fn macro_ratios(&self) -> MacroRatios {
        match self {
            // protein-heavy to hold on to muscle in a deficit
            Goal::Lose => MacroRatios {
                protein: 0.35,
                fat: 0.25,
                carbs: 0.40,
            },
            Goal::Gain => MacroRatios {
                protein: 0.25,
                fat: 0.30,
                carbs: 0.45,
            },
            Goal::Maintain | Goal::Unspecified => MacroRatios {
                protein: 0.30,
                fat: 0.30,
                carbs: 0.40,
            },
        }
    }
}

/// Biometric inputs of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInputs {
    pub age: i32,
    #[serde(default)]
    pub gender: Gender,
    /// centimetres
    pub height: f64,
    /// kilograms
    pub weight: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
}

/// Daily intake the planner aims for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTargets {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub bmi: f64,
    pub bmr: i32,
    pub tdee: i32,
    pub target_calories: i32,
    pub target_protein: i32,
    pub target_carbs: i32,
    pub target_fat: i32,
}

impl BodyMetrics {
    pub fn targets(&self) -> MacroTargets {
        MacroTargets {
            calories: self.target_calories as f64,
            protein: self.target_protein as f64,
            carbs: self.target_carbs as f64,
            fat: self.target_fat as f64,
        }
    }
}

/// Compute BMI, BMR, TDEE and daily macro targets.
///
/// Inputs are not validated; out-of-range values yield degenerate output.
pub fn calculate_metrics(input: &ProfileInputs) -> BodyMetrics {
    let height_m = input.height / 100.0;
    let bmi = input.weight / (height_m * height_m);

    let base = 10.0 * input.weight + 6.25 * input.height - 5.0 * input.age as f64;
    let male = base + 5.0;
    let female = base - 161.0;
    let bmr = match input.gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Other => (male + female) / 2.0,
    };

    let tdee = bmr * input.activity_level.multiplier();
    let target_calories = tdee + input.goal.calorie_offset();

    let ratios = input.goal.macro_ratios();
    let target_protein = target_calories * ratios.protein / KCAL_PER_G_PROTEIN_CARBS;
    let target_carbs = target_calories * ratios.carbs / KCAL_PER_G_PROTEIN_CARBS;
    let target_fat = target_calories * ratios.fat / KCAL_PER_G_FAT;

    BodyMetrics {
        bmi: round_to(bmi, 1),
        bmr: round_int(bmr),
        tdee: round_int(tdee),
        target_calories: round_int(target_calories),
        target_protein: round_int(target_protein),
        target_carbs: round_int(target_carbs),
        target_fat: round_int(target_fat),
    }
}

/// Round half away from zero to `decimals` places.
///
/// Negative halves round down (-2.5 -> -3), unlike JavaScript's `Math.round`;
/// only degenerate inputs produce negative values here.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn round_int(value: f64) -> i32 {
    value.round() as i32
}
