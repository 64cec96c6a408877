use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Chat relay request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Relay a message to the configured reply provider
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> ServerResult<impl IntoResponse> {
    if request.message.trim().is_empty() {
        return Err(ServerError::BadRequest("message must not be empty".into()));
    }

    let reply = state.chat.reply(&request.message).await?;
    Ok(Json(json!({ "reply": reply })))
}
