//! WebSocket handlers for real-time message delivery.
//!
//! Two endpoints upgrade an HTTP connection to a WebSocket:
//!
//! - **`/ws/users/:user_id`** attaches the user's mailbox. Every message
//!   addressed to that user is forwarded as a JSON text frame. Connecting
//!   again replaces the previous connection's mailbox.
//! - **`/ws/conversations/:conversation_id`** subscribes to the
//!   conversation topic. Every message saved into the conversation is
//!   broadcast to all subscribers.
//!
//! Lagged topic subscribers (when the client is too slow to keep up) are
//! handled gracefully: the handler logs a warning and continues receiving.

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::state::AppState;

/// Incoming command from a WebSocket client.
///
/// Clients send JSON-encoded text frames matching one of these variants.
/// Unknown or malformed messages are logged and ignored.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    /// Keep-alive ping. Server responds with `{"type":"pong"}`.
    Ping,
}

/// Upgrade an HTTP request to a per-user delivery WebSocket.
///
/// This is mounted at `/ws/users/:user_id` in the router.
pub async fn user_ws_handler(
    ws: WebSocketUpgrade,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_user_connection(socket, state, user_id))
}

/// Upgrade an HTTP request to a conversation stream WebSocket.
///
/// This is mounted at `/ws/conversations/:conversation_id` in the router.
pub async fn conversation_ws_handler(
    ws: WebSocketUpgrade,
    Path(conversation_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_conversation_connection(socket, state, conversation_id))
}

/// Core connection handler for a user's mailbox.
///
/// Uses `tokio::select!` to multiplex between draining the mailbox and
/// incoming WebSocket messages from the client. This keeps both sender and
/// receiver in a single task, enabling bidirectional communication (e.g.
/// responding to `Ping` with a pong).
async fn handle_user_connection(socket: WebSocket, state: AppState, user_id: String) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let mut mailbox = state.push_router.attach_user(&user_id);
    tracing::debug!(user_id = %user_id, "user mailbox attached");

    loop {
        tokio::select! {
            // --- Branch 1: Forward mailbox deliveries to the client ---
            delivery = mailbox.recv() => {
                match delivery {
                    Some(message) => {
                        match serde_json::to_string(&message) {
                            Ok(json) => {
                                if ws_sender.send(WsMessage::Text(json.into())).await.is_err() {
                                    // Client disconnected
                                    state.push_router.detach_user(&user_id);
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::warn!("Failed to serialize message: {err}");
                            }
                        }
                    }
                    None => {
                        // Our mailbox sender was dropped, which happens when a
                        // newer connection for the same user replaced it. Do
                        // not detach: that would remove the replacement.
                        break;
                    }
                }
            }

            // --- Branch 2: Process commands from the client ---
            frame = ws_receiver.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        process_command(&text, &mut ws_sender).await;
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        // Client disconnected
                        state.push_router.detach_user(&user_id);
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        state.push_router.detach_user(&user_id);
                        break;
                    }
                    // Ignore binary, ping, pong protocol frames (handled by axum/tungstenite)
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::debug!(user_id = %user_id, "user WebSocket connection closed");
}

/// Core connection handler for a conversation topic stream.
async fn handle_conversation_connection(
    socket: WebSocket,
    state: AppState,
    conversation_id: String,
) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let mut topic_rx = state.push_router.subscribe_topic(&conversation_id);
    tracing::debug!(conversation_id = %conversation_id, "conversation stream subscribed");

    loop {
        tokio::select! {
            // --- Branch 1: Forward topic broadcasts to the client ---
            delivery = topic_rx.recv() => {
                match delivery {
                    Ok(message) => {
                        match serde_json::to_string(&message) {
                            Ok(json) => {
                                if ws_sender.send(WsMessage::Text(json.into())).await.is_err() {
                                    // Client disconnected
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::warn!("Failed to serialize message: {err}");
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            skipped = n,
                            conversation_id = %conversation_id,
                            "conversation subscriber lagged, skipping {n} messages"
                        );
                        // Continue receiving -- the client will miss some
                        // messages but will catch up with the next ones.
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        // Topic sender was dropped (server shutting down)
                        break;
                    }
                }
            }

            // --- Branch 2: Process commands from the client ---
            frame = ws_receiver.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        process_command(&text, &mut ws_sender).await;
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::debug!(conversation_id = %conversation_id, "conversation WebSocket connection closed");
}

/// Parse and process a single command from the WebSocket client.
async fn process_command(
    text: &str,
    ws_sender: &mut (impl SinkExt<WsMessage, Error = axum::Error> + Unpin),
) {
    let cmd: WsCommand = match serde_json::from_str(text) {
        Ok(cmd) => cmd,
        Err(err) => {
            tracing::warn!(
                raw = %text,
                error = %err,
                "Ignoring malformed WebSocket command"
            );
            return;
        }
    };

    match cmd {
        WsCommand::Ping => {
            let pong = r#"{"type":"pong"}"#;
            if ws_sender.send(WsMessage::Text(pong.into())).await.is_err() {
                tracing::debug!("Failed to send pong (client disconnecting)");
            }
        }
    }
}
