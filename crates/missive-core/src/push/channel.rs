//! Push channel trait definition.
//!
//! Defines the live-delivery interface the message service fans out through
//! after a successful write. The trait keeps the write path decoupled from
//! the delivery transport; missive-core ships the in-process `PushRouter`
//! implementation.

use missive_types::error::PushError;
use missive_types::message::Message;

/// Push channel for best-effort live delivery of stored messages.
///
/// Implementations must distinguish the two delivery modes: a message
/// addressed to a user fails when that user has no mailbox, while a topic
/// with no subscribers is not an error.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait PushChannel: Send + Sync {
    /// Deliver a message to one user's private mailbox.
    fn send_to_user(
        &self,
        user_id: &str,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), PushError>> + Send;

    /// Deliver a message to every current subscriber of a topic.
    fn send_to_topic(
        &self,
        topic_key: &str,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), PushError>> + Send;
}
