//! Conversation identity and aggregation.
//!
//! This module derives everything "conversation" from the flat message
//! store:
//! - `key` -- commutative conversation-id derivation and participant parsing
//! - `aggregate` -- pure summarization of a message snapshot into per-viewer
//!   conversation summaries

pub mod aggregate;
pub mod key;

pub use aggregate::summarize;
