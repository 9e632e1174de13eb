use crate::handlers::auth::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use nutriguide_ai::{build_shopping_list, PlanOptions};
use nutriguide_models::plan::{
    MealPlanRequest, PlanProvenance, ShoppingList, WeeklyPlan,
};
use nutriguide_models::user::Goal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub diet_plan: WeeklyPlan,
    pub goal: Goal,
    pub calorie_target: i32,
    pub diet_preference: String,
    pub non_veg_preference: bool,
    pub allergies: Vec<String>,
    pub medical_conditions: Vec<String>,
    pub plan_type: PlanProvenance,
    pub generated_by: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Generate a weekly meal plan. Request values override the stored
/// profile; the endpoint always succeeds and reports how the plan was
/// produced.
pub async fn generate_diet_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(request): Json<MealPlanRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, Json<ErrorResponse>)> {
    request.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("validation_error", &e.to_string())),
        )
    })?;

    let profile = state.auth_service.me(auth_user.user_id).await.map_err(|e| {
        tracing::error!("Failed to load profile: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("internal_error", "Failed to load profile")),
        )
    })?;

    let goal = request.goal.or(profile.goal).unwrap_or(Goal::Maintain);
    let calorie_target = request
        .calorie_target
        .or(profile.daily_calories.map(|c| c as i32))
        .unwrap_or(2000);
    let diet_preference = request
        .diet_preference
        .unwrap_or_else(|| "balanced".to_string());

    let options = PlanOptions {
        goal,
        calorie_target,
        diet_preference: diet_preference.clone(),
        non_veg_preference: request.non_veg_preference,
        allergies: request.allergies.clone(),
        medical_conditions: request.medical_conditions.clone(),
    };

    let generated = state.planner.weekly_plan(&options).await;

    let (generated_by, warning) = match generated.provenance {
        PlanProvenance::AiGenerated => ("gemini_json", None),
        PlanProvenance::Fallback => ("fallback", None),
        PlanProvenance::Timeout => ("timeout", None),
        PlanProvenance::TextFallback => (
            "gemini_raw",
            Some("AI response was not valid JSON - using structured fallback.".to_string()),
        ),
    };

    Ok(Json(PlanResponse {
        diet_plan: generated.plan,
        goal,
        calorie_target,
        diet_preference,
        non_veg_preference: request.non_veg_preference,
        allergies: request.allergies,
        medical_conditions: request.medical_conditions,
        plan_type: generated.provenance,
        generated_by,
        original_response: generated.raw_response,
        warning,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ShoppingListRequest {
    /// Accepted for API compatibility; the staple list covers the
    /// generated plans.
    #[serde(default)]
    pub meal_plan: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub shopping_list: ShoppingList,
    pub message: String,
    pub generated_by: &'static str,
}

/// Grocery list for the week's plan
pub async fn shopping_list(
    State(_state): State<Arc<AppState>>,
    Extension(_auth_user): Extension<AuthUser>,
    Json(_request): Json<ShoppingListRequest>,
) -> Json<ShoppingListResponse> {
    Json(ShoppingListResponse {
        shopping_list: build_shopping_list(),
        message: "Shopping list generated successfully".to_string(),
        generated_by: "backend",
    })
}
