use axum::{extract::Query, Json};
use nutriguide_models::food::{search, FoodFacts};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FoodQuery {
    #[serde(default)]
    pub food_name: String,
}

#[derive(Debug, Serialize)]
pub struct FoodSearchResponse {
    pub results: Vec<FoodFacts>,
}

/// Search the built-in food catalog
pub async fn food_search(Query(query): Query<FoodQuery>) -> Json<FoodSearchResponse> {
    Json(FoodSearchResponse {
        results: search(&query.food_name),
    })
}
