// Body-metric formulas computed at registration and profile updates.

use crate::user::{Gender, Goal};

/// Body mass index from weight in kilograms and height in centimeters,
/// rounded to two decimals. Missing or non-positive inputs yield `None`.
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg?;
    let height = height_cm?;
    if weight <= 0.0 || height <= 0.0 {
        return None;
    }
    let meters = height / 100.0;
    Some((weight / (meters * meters) * 100.0).round() / 100.0)
}

/// Daily calorie target: Mifflin-St Jeor BMR with a sedentary activity
/// factor, shifted 500 kcal toward the weight goal.
pub fn daily_calorie_target(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    gender: Option<Gender>,
    goal: Option<Goal>,
    age: Option<u32>,
) -> Option<f64> {
    let weight = weight_kg?;
    let height = height_cm?;
    let gender = gender?;
    if weight <= 0.0 || height <= 0.0 {
        return None;
    }

    let age = f64::from(age.unwrap_or(30));
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female | Gender::Other => -161.0,
    };
    let bmr = 10.0 * weight + 6.25 * height - 5.0 * age + offset;

    let mut calories = bmr * 1.2;
    match goal {
        Some(Goal::Lose) => calories -= 500.0,
        Some(Goal::Gain) => calories += 500.0,
        Some(Goal::Maintain) | None => {}
    }
    Some(calories.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        // 70 kg at 175 cm -> 22.857... -> 22.86
        assert_eq!(bmi(Some(70.0), Some(175.0)), Some(22.86));
    }

    #[test]
    fn test_bmi_rejects_missing_or_invalid_inputs() {
        assert_eq!(bmi(None, Some(175.0)), None);
        assert_eq!(bmi(Some(70.0), None), None);
        assert_eq!(bmi(Some(70.0), Some(0.0)), None);
        assert_eq!(bmi(Some(-1.0), Some(175.0)), None);
    }

    #[test]
    fn test_calorie_target_male_maintain() {
        // BMR = 700 + 1093.75 - 150 + 5 = 1648.75; * 1.2 = 1978.5 -> 1979
        let target = daily_calorie_target(
            Some(70.0),
            Some(175.0),
            Some(Gender::Male),
            Some(Goal::Maintain),
            None,
        );
        assert_eq!(target, Some(1979.0));
    }

    #[test]
    fn test_calorie_target_goal_shifts() {
        let base = daily_calorie_target(
            Some(70.0),
            Some(175.0),
            Some(Gender::Female),
            Some(Goal::Maintain),
            None,
        )
        .unwrap();
        let lose = daily_calorie_target(
            Some(70.0),
            Some(175.0),
            Some(Gender::Female),
            Some(Goal::Lose),
            None,
        )
        .unwrap();
        let gain = daily_calorie_target(
            Some(70.0),
            Some(175.0),
            Some(Gender::Female),
            Some(Goal::Gain),
            None,
        )
        .unwrap();
        assert_eq!(lose, base - 500.0);
        assert_eq!(gain, base + 500.0);
    }

    #[test]
    fn test_calorie_target_requires_gender() {
        assert_eq!(
            daily_calorie_target(Some(70.0), Some(175.0), None, Some(Goal::Lose), None),
            None
        );
    }
}
