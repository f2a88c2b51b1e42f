//! Per-user handlers for the REST API.
//!
//! Endpoints for a user's cross-conversation message feed, their
//! conversation overview, and block-list management.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use missive_types::block::BlockedUser;
use missive_types::conversation::ConversationSummary;
use missive_types::message::Message;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for blocking another user.
#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    /// The user being blocked.
    pub blocked_user_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/:id/messages - Recent messages sent or received, newest first.
pub async fn get_user_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<Message>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let messages = state.message_service.get_messages_for_user(&user_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(messages, request_id, elapsed)
        .with_link("self", &format!("/api/v1/users/{}/messages", user_id));

    Ok(resp)
}

/// GET /api/v1/users/:id/conversations - Conversation overview for a user.
///
/// One summary per conversation the user recently participated in, newest
/// activity first. Storage trouble degrades to an empty list rather than
/// an error.
pub async fn get_user_conversations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<ConversationSummary>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let summaries = state.message_service.list_conversations(&user_id).await;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(summaries, request_id, elapsed)
        .with_link("self", &format!("/api/v1/users/{}/conversations", user_id));

    Ok(resp)
}

/// POST /api/v1/users/:id/block - Block another user.
///
/// Idempotent: repeating the request returns the existing relation.
pub async fn block_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<BlockRequest>,
) -> Result<ApiResponse<BlockedUser>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let relation = state
        .block_service
        .block(&user_id, &body.blocked_user_id)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(relation, request_id, elapsed)
        .with_link("self", &format!("/api/v1/users/{}/blocked", user_id));

    Ok(resp)
}

/// GET /api/v1/users/:id/blocked - List users this user has blocked.
pub async fn get_blocked_users(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<BlockedUser>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let blocked = state.block_service.list(&user_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(blocked, request_id, elapsed)
        .with_link("self", &format!("/api/v1/users/{}/blocked", user_id));

    Ok(resp)
}
