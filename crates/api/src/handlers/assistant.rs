use crate::AppState;
use axum::{extract::State, Json};
use nutriguide_ai::AssistantReply;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub user_message: String,
}

/// Nutrition chat assistant; degrades to a canned reply without AI
pub async fn chatbot(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<AssistantReply> {
    Json(state.assistant.respond(&request.user_message).await)
}
