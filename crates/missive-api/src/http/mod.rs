//! HTTP/REST API layer for missive.
//!
//! Axum-based REST API at `/api/v1/` with envelope response format, CORS
//! support, and WebSocket push endpoints under `/ws/`.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
