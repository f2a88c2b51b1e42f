//! Shared domain types for missive.
//!
//! This crate contains the core domain types used across the missive
//! workspace: Message, ConversationSummary, BlockedUser, MessageEvent,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod block;
pub mod config;
pub mod conversation;
pub mod error;
pub mod event;
pub mod message;
