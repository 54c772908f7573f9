//! Chat HTTP handler.
//!
//! Endpoint:
//! - POST /chat - Send a message within a session and get the model's reply

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use followup_types::llm::Message;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub messages: Vec<Message>,
}

/// POST /chat - Run one chat turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if body.session_id.trim().is_empty() {
        return Err(AppError::Validation("session_id must not be empty".to_string()));
    }
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let outcome = state
        .chat_service
        .handle_chat(&body.session_id, &body.message)
        .await?;

    Ok(Json(ChatResponse {
        response: outcome.response,
        messages: outcome.messages,
    }))
}
