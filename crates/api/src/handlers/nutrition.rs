use crate::handlers::auth::{ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use nutriguide_database::DatabaseError;
use nutriguide_models::nutrition::{
    DailySummary, DayHistory, NewNutritionEntry, NutritionEntry, UpdateNutritionEntry,
};
use nutriguide_tenant::TenantContext;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

fn db_error(err: DatabaseError) -> (StatusCode, Json<ErrorResponse>) {
    match &err {
        DatabaseError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("not_found", &err.to_string())),
        ),
        // A failed tenant bind aborts the unit of work before any query
        // runs; it surfaces as a generic failure, never as data.
        _ => {
            tracing::error!("Database error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Database error")),
            )
        }
    }
}

fn validation_error(err: validator::ValidationErrors) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("validation_error", &err.to_string())),
    )
}

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<NutritionEntry>,
}

/// List the day's entries (today when no date is given)
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<TenantContext>,
    Query(query): Query<EntriesQuery>,
) -> Result<Json<EntriesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    state
        .nutrition_repo
        .list_for_date(tenant.tenant_id(), date)
        .await
        .map(|entries| Json(EntriesResponse { entries }))
        .map_err(db_error)
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub entry: NutritionEntry,
}

/// Log a food item
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<TenantContext>,
    Json(request): Json<NewNutritionEntry>,
) -> Result<(StatusCode, Json<EntryResponse>), (StatusCode, Json<ErrorResponse>)> {
    request.validate().map_err(validation_error)?;

    state
        .nutrition_repo
        .create(tenant.tenant_id(), &request)
        .await
        .map(|entry| (StatusCode::CREATED, Json(EntryResponse { entry })))
        .map_err(db_error)
}

pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<TenantContext>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateNutritionEntry>,
) -> Result<Json<EntryResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .nutrition_repo
        .update(tenant.tenant_id(), entry_id, &request)
        .await
        .map(|entry| Json(EntryResponse { entry }))
        .map_err(db_error)
}

pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<TenantContext>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .nutrition_repo
        .delete(tenant.tenant_id(), entry_id)
        .await
        .map_err(db_error)?;

    Ok(Json(MessageResponse {
        message: "Deleted".to_string(),
    }))
}

/// Today's calorie total and entry count
pub async fn daily_summary(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<TenantContext>,
) -> Result<Json<DailySummary>, (StatusCode, Json<ErrorResponse>)> {
    let today = Utc::now().date_naive();

    state
        .nutrition_repo
        .daily_summary(tenant.tenant_id(), today)
        .await
        .map(Json)
        .map_err(db_error)
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<DayHistory>,
}

/// Per-day calorie totals, newest first (default 7 days)
pub async fn history(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<TenantContext>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let limit = query.limit.unwrap_or(7).clamp(1, 90);

    state
        .nutrition_repo
        .history(tenant.tenant_id(), limit)
        .await
        .map(|history| Json(HistoryResponse { history }))
        .map_err(db_error)
}
