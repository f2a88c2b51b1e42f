//! Message handlers for the REST API.
//!
//! Endpoints for saving messages, recalling them, acknowledging delivery
//! status, and deletion. Saving is the hot path: it persists the message,
//! then attempts live push and event publication, and reports both advisory
//! outcomes in the receipt.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use missive_types::message::{DeliveryStatus, MessageDraft, SaveReceipt};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Header carrying the client's idempotency token for optimistic echo
/// reconciliation.
const IDEMPOTENCY_HEADER: &str = "x-idempotency-token";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for acknowledging a delivery status transition.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// The new status (e.g. "delivered", "read").
    pub status: DeliveryStatus,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/messages - Save a message and fan it out.
pub async fn save_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<MessageDraft>,
) -> Result<ApiResponse<SaveReceipt>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let token = headers
        .get(IDEMPOTENCY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let receipt = state.message_service.save(body, token).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let self_href = format!("/api/v1/messages/{}", receipt.message.id);
    let resp =
        ApiResponse::success(receipt, request_id, elapsed).with_link("self", &self_href);

    Ok(resp)
}

/// POST /api/v1/messages/:id/recall - Recall a message.
///
/// Always returns 200: `recalled` is true when this request performed the
/// transition, false when the message was already recalled or does not
/// exist. Recall is deliberately ambiguous about which of the two.
pub async fn recall_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let changed = state.message_service.recall(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"id": id, "recalled": changed}),
        request_id,
        elapsed,
    );

    Ok(resp)
}

/// POST /api/v1/messages/:id/status - Acknowledge a delivery status.
pub async fn update_message_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let updated = state
        .message_service
        .update_status(&id, body.status.clone())
        .await?;
    if !updated {
        return Err(AppError::Message(missive_types::error::MessageError::NotFound));
    }

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        serde_json::json!({"id": id, "status": body.status.as_str()}),
        request_id,
        elapsed,
    );

    Ok(resp)
}

/// DELETE /api/v1/messages/:id - Delete a single message permanently.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let deleted = state.message_service.delete(&id).await?;
    if !deleted {
        return Err(AppError::Message(missive_types::error::MessageError::NotFound));
    }

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        serde_json::json!({"id": id, "deleted": true}),
        request_id,
        elapsed,
    );

    Ok(resp)
}
