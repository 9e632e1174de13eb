use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "meal_type", rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One logged food item. `user_id` is the row-security tenant column;
/// queries never filter on it explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NutritionEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub meal_type: MealType,
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewNutritionEntry {
    #[validate(length(min = 1, max = 100))]
    pub food_name: String,

    #[validate(range(min = 0.0))]
    pub quantity: f64,

    #[validate(length(min = 1, max = 20))]
    pub unit: String,

    pub meal_type: MealType,

    #[validate(range(min = 0))]
    pub calories: i32,

    #[validate(range(min = 0.0))]
    pub protein_g: f64,

    #[validate(range(min = 0.0))]
    pub carbs_g: f64,

    #[validate(range(min = 0.0))]
    pub fat_g: f64,

    /// Defaults to today when omitted.
    pub entry_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNutritionEntry {
    pub food_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub meal_type: Option<MealType>,
    pub calories: Option<i32>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

/// Calorie total for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_calories: i64,
    pub entries_count: i64,
}

/// One row of the per-day history view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DayHistory {
    pub entry_date: NaiveDate,
    pub total_calories: i64,
    pub food_count: i64,
}
