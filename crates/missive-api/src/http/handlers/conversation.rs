//! Conversation handlers for the REST API.
//!
//! A conversation is addressed by its id; history is served oldest-first
//! over the recent window, with recalled content already substituted.

use std::time::Instant;

use axum::extract::{Path, State};
use uuid::Uuid;

use missive_types::message::Message;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/conversations/:id/messages - Recent history, oldest first.
pub async fn get_conversation_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<ApiResponse<Vec<Message>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let messages = state.message_service.get_history(&conversation_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(messages, request_id, elapsed).with_link(
        "self",
        &format!("/api/v1/conversations/{}/messages", conversation_id),
    );

    Ok(resp)
}

/// DELETE /api/v1/conversations/:id/messages - Clear a conversation.
///
/// Returns 200 whether or not any rows existed; `deleted` reports whether
/// anything was removed.
pub async fn delete_conversation_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let deleted = state
        .message_service
        .delete_all_by_conversation(&conversation_id)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"conversation_id": conversation_id, "deleted": deleted}),
        request_id,
        elapsed,
    );

    Ok(resp)
}
