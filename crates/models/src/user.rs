use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Weight-management goal selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "goal_type", rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    // Doubles as the tenant identity: every row the user owns is scoped
    // to this id via the session variable set at connection checkout.
    pub id: Uuid,

    pub email: String,

    // NULL for accounts created through federated login only
    pub password_hash: Option<String>,

    pub current_weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Option<Gender>,
    pub goal: Option<Goal>,
    pub weight_goal_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub daily_calories: Option<f64>,

    pub is_active: bool,

    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(range(min = 20.0, max = 500.0))]
    pub current_weight_kg: Option<f64>,

    #[validate(range(min = 50.0, max = 280.0))]
    pub height_cm: Option<f64>,

    pub gender: Option<Gender>,
    pub goal: Option<Goal>,

    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_goal_kg: Option<f64>,
}

/// What the API returns about a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub current_weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Option<Gender>,
    pub goal: Option<Goal>,
    pub weight_goal_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub daily_calories: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            current_weight_kg: user.current_weight_kg,
            height_cm: user.height_cm,
            gender: user.gender,
            goal: user.goal,
            weight_goal_kg: user.weight_goal_kg,
            bmi: user.bmi,
            daily_calories: user.daily_calories,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(range(min = 20.0, max = 500.0))]
    pub current_weight_kg: Option<f64>,

    #[validate(range(min = 50.0, max = 280.0))]
    pub height_cm: Option<f64>,

    pub gender: Option<Gender>,
    pub goal: Option<Goal>,

    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_goal_kg: Option<f64>,
}
