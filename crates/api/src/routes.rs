use crate::handlers;
use crate::middleware;
use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Auth routes
        .route(
            "/api/auth/register",
            post(handlers::auth::register).layer(axum::middleware::from_fn_with_state(
                state.cache.clone(),
                middleware::rate_limit_registration,
            )),
        )
        .route(
            "/api/auth/login",
            post(handlers::auth::login).layer(axum::middleware::from_fn_with_state(
                state.cache.clone(),
                middleware::rate_limit_login,
            )),
        )
        .route(
            "/api/auth/google",
            post(handlers::auth::google_login).layer(axum::middleware::from_fn_with_state(
                state.cache.clone(),
                middleware::rate_limit_login,
            )),
        )
        .route("/api/auth/refresh", post(handlers::auth::refresh_token))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/auth/me",
            get(handlers::auth::me)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/auth/profile",
            put(handlers::auth::update_profile)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/auth/account",
            axum::routing::delete(handlers::auth::deactivate_account)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        // Food catalog - Public
        .route("/api/foods/search", get(handlers::foods::food_search))
        // Chat assistant - Public
        .route("/api/chatbot", post(handlers::assistant::chatbot))
        // Meal planning - Protected
        .route(
            "/api/diet-plan",
            post(handlers::plan::generate_diet_plan)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/shopping-list",
            post(handlers::plan::shopping_list)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        // Nutrition log - Protected
        .route(
            "/api/nutrition/entries",
            get(handlers::nutrition::list_entries)
                .post(handlers::nutrition::create_entry)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/nutrition/entries/:entry_id",
            put(handlers::nutrition::update_entry)
                .delete(handlers::nutrition::delete_entry)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/nutrition/summary",
            get(handlers::nutrition::daily_summary)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/nutrition/history",
            get(handlers::nutrition::history)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        // Plate analysis - Protected
        .route(
            "/api/analyze-plate",
            post(handlers::plate::analyze_food_plate)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .with_state(state)
}
