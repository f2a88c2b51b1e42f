//! Axum router configuration with middleware.
//!
//! REST routes are under `/api/v1/`. WebSocket endpoints live at the root
//! (`/ws/users/:user_id`, `/ws/conversations/:conversation_id`).
//! Middleware: CORS, tracing.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Messages
        .route("/messages", post(handlers::message::save_message))
        .route(
            "/messages/{id}/recall",
            post(handlers::message::recall_message),
        )
        .route(
            "/messages/{id}/status",
            post(handlers::message::update_message_status),
        )
        .route("/messages/{id}", delete(handlers::message::delete_message))
        // Conversations
        .route(
            "/conversations/{id}/messages",
            get(handlers::conversation::get_conversation_messages)
                .delete(handlers::conversation::delete_conversation_messages),
        )
        // Users
        .route(
            "/users/{id}/messages",
            get(handlers::user::get_user_messages),
        )
        .route(
            "/users/{id}/conversations",
            get(handlers::user::get_user_conversations),
        )
        .route("/users/{id}/block", post(handlers::user::block_user))
        .route("/users/{id}/blocked", get(handlers::user::get_blocked_users));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        // Real-time delivery
        .route("/ws/users/{user_id}", get(handlers::ws::user_ws_handler))
        .route(
            "/ws/conversations/{conversation_id}",
            get(handlers::ws::conversation_ws_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
