use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, Extension, Json};
use nutriguide_ai::plate::DEFAULT_IMAGE_URL;
use nutriguide_ai::PlateAnalysis;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PlateRequest {
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlateResponse {
    pub analysis: PlateAnalysis,
    pub message: String,
}

/// Analyze a food-plate image via the external vision API; mock data
/// stands in when the upstream cannot be used
pub async fn analyze_food_plate(
    State(state): State<Arc<AppState>>,
    Extension(_auth_user): Extension<AuthUser>,
    Json(request): Json<PlateRequest>,
) -> Json<PlateResponse> {
    let image_url = request
        .image_url
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    let outcome = state.plate_analyzer.analyze(&image_url).await;
    let message = if outcome.mocked {
        "Food plate analysis completed with mock data; check RAPIDAPI_KEY.".to_string()
    } else {
        "Food plate analyzed successfully".to_string()
    };

    Json(PlateResponse {
        analysis: outcome.analysis,
        message,
    })
}
