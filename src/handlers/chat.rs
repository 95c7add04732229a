use crate::core::error::ChatError;
use crate::core::state::AppState;
use crate::models::api::{AckResponse, ChatSendRequest};
use crate::models::chat::{ChatMessage, Sender};
use axum::{
    extract::{Json, Path, State},
    response::Json as JsonResponse,
};
use std::sync::Arc;
use tracing::info;

/// Append one message to a user's chat log
///
/// POST /api/chat/send {username, text, isAdmin}
pub async fn send_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatSendRequest>,
) -> Result<JsonResponse<AckResponse>, ChatError> {
    if req.username.is_empty() || req.text.is_empty() {
        return Err(ChatError::MissingFields);
    }

    let sender = if req.is_admin { Sender::Admin } else { Sender::User };
    let message = ChatMessage::new(sender, req.text);

    state.store.append_message(&req.username, message)?;

    info!(
        username = %req.username,
        from_admin = req.is_admin,
        "Chat message stored"
    );

    Ok(JsonResponse(AckResponse { success: true }))
}

/// Full ordered chat log for one user; empty if they never wrote
///
/// GET /api/chat/history/{username}
pub async fn history_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<JsonResponse<Vec<ChatMessage>>, ChatError> {
    let history = state.store.list_messages(&username)?;
    Ok(JsonResponse(history))
}
