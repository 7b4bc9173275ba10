use serde::Deserialize;

use crate::metrics::{ActivityLevel, Gender, Goal, ProfileInputs};

pub type CreateProfileRequest = ProfileInputs;

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

impl UpdateProfileRequest {
    pub fn merge_into(self, current: ProfileInputs) -> ProfileInputs {
        ProfileInputs {
            age: self.age.unwrap_or(current.age),
            gender: self.gender.unwrap_or(current.gender),
            height: self.height.unwrap_or(current.height),
            weight: self.weight.unwrap_or(current.weight),
            activity_level: self.activity_level.unwrap_or(current.activity_level),
            goal: self.goal.unwrap_or(current.goal),
        }
    }
}

pub fn validate(inputs: &ProfileInputs) -> Result<(), String> {
    if inputs.age <= 0 {
        return Err("Age must be positive".into());
    }
    if !inputs.height.is_finite() || inputs.height <= 0.0 {
        return Err("Height must be a positive number of centimetres".into());
    }
    if !inputs.weight.is_finite() || inputs.weight <= 0.0 {
        return Err("Weight must be a positive number of kilograms".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> ProfileInputs {
        ProfileInputs {
            age: 30,
            gender: Gender::Female,
            height: 165.0,
            weight: 60.0,
            activity_level: ActivityLevel::Light,
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn merge_overrides_only_given_fields() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"weight":58.5,"goal":"lose"}"#).unwrap();
        let merged = req.merge_into(stored());
        assert_eq!(merged.weight, 58.5);
        assert_eq!(merged.goal, Goal::Lose);
        assert_eq!(merged.age, 30);
        assert_eq!(merged.activity_level, ActivityLevel::Light);
    }

    #[test]
    fn validate_rejects_non_positive_inputs() {
        assert!(validate(&stored()).is_ok());
        let mut bad = stored();
        bad.height = 0.0;
        assert!(validate(&bad).is_err());
        let mut bad = stored();
        bad.age = -4;
        assert_eq!(validate(&bad).unwrap_err(), "Age must be positive");
    }
}
