//! Followup HTTP handlers.
//!
//! Endpoints:
//! - GET    /{session_id}/followups               - List a session's exchanges
//! - DELETE /{session_id}/followups               - Delete all of them
//! - DELETE /{session_id}/followups/{followup_id} - Delete one

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use followup_types::chat::{Exchange, ExchangeId};

use crate::http::error::AppError;
use crate::state::AppState;

/// One stored exchange as returned to clients.
#[derive(Debug, Serialize)]
pub struct FollowupView {
    pub id: ExchangeId,
    pub user_message: String,
    pub ai_response: String,
}

impl From<Exchange> for FollowupView {
    fn from(exchange: Exchange) -> Self {
        Self {
            id: exchange.id,
            user_message: exchange.user_message,
            ai_response: exchange.ai_response,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FollowupsResponse {
    pub session_id: String,
    pub followups: Vec<FollowupView>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /{session_id}/followups - 404 when the session has no exchanges.
pub async fn list_followups(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<FollowupsResponse>, AppError> {
    let exchanges = state.chat_service.list_exchanges(&session_id).await?;

    if exchanges.is_empty() {
        return Err(AppError::NotFound("Session not found.".to_string()));
    }

    Ok(Json(FollowupsResponse {
        session_id,
        followups: exchanges.into_iter().map(FollowupView::from).collect(),
    }))
}

/// DELETE /{session_id}/followups
pub async fn delete_followups(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.chat_service.delete_all_exchanges(&session_id).await?;

    Ok(Json(MessageResponse {
        message: "Follow-ups deleted successfully.".to_string(),
    }))
}

/// DELETE /{session_id}/followups/{followup_id} - succeeds whether or not the row existed.
pub async fn delete_followup(
    State(state): State<AppState>,
    Path((session_id, followup_id)): Path<(String, i64)>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .chat_service
        .delete_exchange(&session_id, ExchangeId(followup_id))
        .await?;

    Ok(Json(MessageResponse {
        message: "Follow-up deleted successfully.".to_string(),
    }))
}
