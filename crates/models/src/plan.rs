use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::Goal;

/// A single suggested meal inside a generated plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub name: String,
    pub calories: i32,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub breakfast: Vec<PlannedMeal>,
    #[serde(default)]
    pub lunch: Vec<PlannedMeal>,
    #[serde(default)]
    pub dinner: Vec<PlannedMeal>,
    #[serde(default)]
    pub snack: Vec<PlannedMeal>,
}

/// Seven sequential days. Named fields keep the JSON keys in weekday order,
/// which the generation prompt also demands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub monday: DayPlan,
    pub tuesday: DayPlan,
    pub wednesday: DayPlan,
    pub thursday: DayPlan,
    pub friday: DayPlan,
    pub saturday: DayPlan,
    pub sunday: DayPlan,
}

impl WeeklyPlan {
    pub fn days_mut(&mut self) -> [&mut DayPlan; 7] {
        [
            &mut self.monday,
            &mut self.tuesday,
            &mut self.wednesday,
            &mut self.thursday,
            &mut self.friday,
            &mut self.saturday,
            &mut self.sunday,
        ]
    }
}

/// How a plan was produced, reported back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanProvenance {
    AiGenerated,
    Fallback,
    Timeout,
    TextFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MealPlanRequest {
    pub goal: Option<Goal>,

    #[validate(range(min = 800, max = 6000))]
    pub calorie_target: Option<i32>,

    #[serde(default)]
    pub diet_preference: Option<String>,

    #[serde(default)]
    pub non_veg_preference: bool,

    #[serde(default)]
    pub allergies: Vec<String>,

    #[serde(default)]
    pub medical_conditions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingCategory {
    pub name: String,
    pub items: Vec<ShoppingItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    pub categories: Vec<ShoppingCategory>,
    pub estimated_cost: String,
    pub total_items: usize,
}
