use crate::client::GenerativeClient;
use crate::json::extract_json;
use lazy_static::lazy_static;
use nutriguide_models::plan::{PlanProvenance, PlannedMeal, WeeklyPlan};
use nutriguide_models::user::Goal;
use rand::seq::SliceRandom;
use std::time::Duration;

const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

fn meal(name: &str, calories: i32) -> PlannedMeal {
    PlannedMeal {
        name: name.to_string(),
        calories,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        description: String::new(),
    }
}

lazy_static! {
    static ref FALLBACK_BREAKFAST: Vec<PlannedMeal> = vec![
        meal("Roti with Daal", 190),
        meal("Paratha with Curd", 250),
        meal("Omelette with Bread", 200),
        meal("Poha", 180),
        meal("Upma", 220),
    ];
    static ref FALLBACK_LUNCH: Vec<PlannedMeal> = vec![
        meal("Rice with Daal and Vegetable", 350),
        meal("Roti with Chicken Curry", 400),
        meal("Biryani (small portion)", 350),
        meal("Dal Rice with Salad", 300),
        meal("Vegetable Curry with Roti", 320),
    ];
    static ref FALLBACK_DINNER: Vec<PlannedMeal> = vec![
        meal("Roti with Daal and Sabzi", 300),
        meal("Chicken with Rice", 350),
        meal("Vegetable Curry with Roti", 280),
        meal("Daal with Rice", 280),
        meal("Simple Khichdi", 250),
    ];
    static ref FALLBACK_SNACK: Vec<PlannedMeal> = vec![
        meal("Fruit Salad", 100),
        meal("Tea with Biscuits", 150),
        meal("Boiled Egg", 70),
        meal("Nuts (small portion)", 180),
        meal("Yogurt", 120),
    ];
}

/// Resolved plan parameters: request values merged over the profile.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub goal: Goal,
    pub calorie_target: i32,
    pub diet_preference: String,
    pub non_veg_preference: bool,
    pub allergies: Vec<String>,
    pub medical_conditions: Vec<String>,
}

#[derive(Debug)]
pub struct GeneratedPlan {
    pub plan: WeeklyPlan,
    pub provenance: PlanProvenance,
    /// The model's raw text, kept for clients that render it.
    pub raw_response: Option<String>,
}

/// Weekly meal-plan generation with a fallback ladder: no client, timeout
/// and unparseable output all degrade to a sampled plan instead of an
/// error, tagged with how the plan was produced.
pub struct MealPlanner {
    client: Option<GenerativeClient>,
    timeout: Duration,
}

impl MealPlanner {
    pub fn new(client: Option<GenerativeClient>) -> Self {
        Self {
            client,
            timeout: GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub async fn weekly_plan(&self, options: &PlanOptions) -> GeneratedPlan {
        let Some(client) = &self.client else {
            return GeneratedPlan {
                plan: sampled_plan(),
                provenance: PlanProvenance::Fallback,
                raw_response: None,
            };
        };

        let prompt = build_prompt(options);
        let raw = match tokio::time::timeout(self.timeout, client.generate(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "plan generation failed, using fallback plan");
                return GeneratedPlan {
                    plan: sampled_plan(),
                    provenance: PlanProvenance::Fallback,
                    raw_response: None,
                };
            }
            Err(_) => {
                tracing::warn!("plan generation timed out, using fallback plan");
                return GeneratedPlan {
                    plan: sampled_plan(),
                    provenance: PlanProvenance::Timeout,
                    raw_response: None,
                };
            }
        };

        match serde_json::from_str::<WeeklyPlan>(extract_json(&raw)) {
            Ok(plan) => GeneratedPlan {
                plan,
                provenance: PlanProvenance::AiGenerated,
                raw_response: Some(raw),
            },
            Err(err) => {
                tracing::warn!(error = %err, "plan reply was not valid JSON, using fallback plan");
                GeneratedPlan {
                    plan: sampled_plan(),
                    provenance: PlanProvenance::TextFallback,
                    raw_response: Some(raw),
                }
            }
        }
    }
}

fn build_prompt(options: &PlanOptions) -> String {
    let goal = match options.goal {
        Goal::Lose => "lose",
        Goal::Maintain => "maintain",
        Goal::Gain => "gain",
    };
    let food_type = if options.non_veg_preference {
        "non-vegetarian"
    } else {
        "vegetarian"
    };
    let allergen_info = if options.allergies.is_empty() {
        String::new()
    } else {
        format!(" avoiding: {}", options.allergies.join(", "))
    };
    let medical_info = if options.medical_conditions.is_empty() {
        String::new()
    } else {
        format!(
            " with considerations for: {}",
            options.medical_conditions.join(", ")
        )
    };

    format!(
        r#"Generate a comprehensive 7-day Pakistani meal plan with breakfast, lunch, dinner, and snacks for each day in SEQUENTIAL order (Monday through Sunday).
Goal: {goal}, Target calories: ~{target} kcal per day, Diet type: {food_type}, Preference: {preference}{allergen_info}{medical_info}.
Structure the response as a JSON object with days of the week in lowercase as keys in sequential order: monday, tuesday, wednesday, thursday, friday, saturday, sunday.
Each day should contain breakfast, lunch, dinner, and snack keys with arrays of meal objects.
Each meal object should include: name, calories (integer), protein (in grams), carbs (in grams), fat (in grams), description.
Return ONLY the JSON object with no additional text. Ensure days are in correct sequential order."#,
        target = options.calorie_target,
        preference = options.diet_preference,
    )
}

/// One randomly sampled meal per slot per day.
fn sampled_plan() -> WeeklyPlan {
    let mut rng = rand::thread_rng();
    let mut plan = WeeklyPlan::default();
    for day in plan.days_mut() {
        day.breakfast = sample(&FALLBACK_BREAKFAST, &mut rng);
        day.lunch = sample(&FALLBACK_LUNCH, &mut rng);
        day.dinner = sample(&FALLBACK_DINNER, &mut rng);
        day.snack = sample(&FALLBACK_SNACK, &mut rng);
    }
    plan
}

fn sample(pool: &[PlannedMeal], rng: &mut impl rand::Rng) -> Vec<PlannedMeal> {
    pool.choose(rng).cloned().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> PlanOptions {
        PlanOptions {
            goal: Goal::Maintain,
            calorie_target: 2000,
            diet_preference: "balanced".to_string(),
            non_veg_preference: false,
            allergies: vec![],
            medical_conditions: vec![],
        }
    }

    #[tokio::test]
    async fn test_unconfigured_planner_falls_back() {
        let planner = MealPlanner::new(None);
        let generated = planner.weekly_plan(&options()).await;

        assert_eq!(generated.provenance, PlanProvenance::Fallback);
        assert!(generated.raw_response.is_none());
        // Every slot of every day is populated from the static pools.
        let mut plan = generated.plan;
        for day in plan.days_mut() {
            assert_eq!(day.breakfast.len(), 1);
            assert_eq!(day.lunch.len(), 1);
            assert_eq!(day.dinner.len(), 1);
            assert_eq!(day.snack.len(), 1);
        }
    }

    #[test]
    fn test_prompt_mentions_constraints() {
        let mut opts = options();
        opts.non_veg_preference = true;
        opts.allergies = vec!["peanuts".to_string()];
        opts.medical_conditions = vec!["diabetes".to_string()];

        let prompt = build_prompt(&opts);
        assert!(prompt.contains("non-vegetarian"));
        assert!(prompt.contains("avoiding: peanuts"));
        assert!(prompt.contains("considerations for: diabetes"));
        assert!(prompt.contains("~2000 kcal"));
    }

    #[test]
    fn test_weekly_plan_parses_model_shaped_json() {
        let raw = r#"```json
        {
          "monday": {"breakfast": [{"name": "Poha", "calories": 180,
                     "protein": 4, "carbs": 30, "fat": 4,
                     "description": "Flattened rice"}]},
          "tuesday": {}, "wednesday": {}, "thursday": {},
          "friday": {}, "saturday": {}, "sunday": {}
        }
        ```"#;
        let plan: WeeklyPlan = serde_json::from_str(extract_json(raw)).unwrap();
        assert_eq!(plan.monday.breakfast[0].name, "Poha");
        assert!(plan.tuesday.lunch.is_empty());
    }
}
