// NutriGuide API Server
// Main entry point for the diet-planning REST API

mod config;
mod handlers;
mod middleware;
mod routes;

use config::Config;
use dotenvy::dotenv;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub struct AppState {
    pub auth_service: nutriguide_auth::AuthService,
    pub nutrition_repo: nutriguide_database::NutritionEntryRepository,
    pub planner: nutriguide_ai::MealPlanner,
    pub assistant: nutriguide_ai::NutritionAssistant,
    pub plate_analyzer: nutriguide_ai::PlateAnalyzer,
    pub cache: Arc<nutriguide_cache::Cache>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,nutriguide_api=debug,tower_http=debug".to_string()),
        )
        .init();

    tracing::info!("🚀 Starting NutriGuide API Server");
    tracing::info!("📦 Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env();
    tracing::info!("🔌 Server: {}:{}", config.server_host, config.server_port);

    // Initialize database; every checkout is tenant-bound from here on
    tracing::info!("🗄️  Connecting to database...");
    let database = nutriguide_database::Database::new(config.database.clone())
        .await
        .expect("Failed to connect to database");
    database.migrate().await.expect("Migrations failed");
    database.ping().await.expect("Database ping failed");
    tracing::info!("✅ Database connected");

    // Initialize cache
    tracing::info!("⚡ Connecting to Redis...");
    let cache = nutriguide_cache::Cache::new(config.cache.clone())
        .await
        .expect("Failed to connect to Redis");
    cache.ping().await.expect("Redis ping failed");
    tracing::info!("✅ Redis connected");

    // Initialize JWT service
    let jwt_service = nutriguide_auth::JwtService::from_env();
    tracing::info!("🔐 JWT service initialized");

    // Create auth service
    let google_verifier = nutriguide_auth::GoogleVerifier::from_env();
    let auth_service = nutriguide_auth::AuthService::new(
        database.clone(),
        cache.clone(),
        jwt_service,
        google_verifier,
    );
    tracing::info!("🔑 Auth service initialized");

    // Nutrition log repository
    let nutrition_repo = nutriguide_database::NutritionEntryRepository::new(database.clone());
    tracing::info!("🥗 Nutrition log initialized");

    // Generative AI collaborators; each degrades gracefully when its key
    // is missing
    let generative = nutriguide_ai::GenerativeClient::from_env();
    match &generative {
        Some(client) => tracing::info!("🤖 Generative AI ready (model: {})", client.model()),
        None => tracing::warn!("🤖 GEMINI_API_KEY not set, AI endpoints run on fallbacks"),
    }
    let planner = nutriguide_ai::MealPlanner::new(generative.clone());
    let assistant = nutriguide_ai::NutritionAssistant::new(generative);

    let plate_analyzer = nutriguide_ai::PlateAnalyzer::from_env();
    if !plate_analyzer.is_configured() {
        tracing::warn!("🍽️  RAPIDAPI_KEY not set, plate analysis returns mock data");
    }

    // Create app state
    let state = Arc::new(AppState {
        auth_service,
        nutrition_repo,
        planner,
        assistant,
        plate_analyzer,
        cache: Arc::new(cache),
    });

    // Create router
    let app = routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("✅ Server ready at http://{}", addr);

    axum::serve(listener, app).await.expect("Server error");

    Ok(())
}
