//! MessageStore trait definition.
//!
//! Keyed persistence for messages, queryable by conversation and by
//! participant, ordered by creation time.

use chrono::{DateTime, Utc};
use missive_types::error::StoreError;
use missive_types::message::{DeliveryStatus, Message};

/// Presentation order for windowed conversation queries.
///
/// The window itself always covers the most recent rows; the order only
/// controls how that window is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest message of the window first.
    Ascending,
    /// Newest message first.
    Descending,
}

/// Store trait for message persistence.
///
/// Implementations live in missive-infra (e.g., `SqliteMessageStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Writes are atomic per message row; rows are independent entities keyed
/// by their own id, so no cross-row transaction is required.
pub trait MessageStore: Send + Sync {
    /// Persist one message row.
    fn put(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Fetch a message by id.
    fn get_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Message>, StoreError>> + Send;

    /// The most recent `limit` messages of a conversation, presented in the
    /// given order. Ties at equal timestamps resolve by id.
    fn get_recent_by_conversation(
        &self,
        conversation_id: &str,
        order: SortOrder,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, StoreError>> + Send;

    /// The most recent `limit` messages where the user is sender or
    /// receiver, newest first.
    fn get_recent_by_participant(
        &self,
        user_id: &str,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, StoreError>> + Send;

    /// Set `recalled` and stamp `recalled_at` if the message exists and is
    /// not already recalled. Returns whether a row changed, so recall stays
    /// monotonic without a read-modify-write cycle.
    fn mark_recalled(
        &self,
        id: &str,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;

    /// Record a delivery acknowledgment. Returns whether the message exists.
    fn update_status(
        &self,
        id: &str,
        status: &DeliveryStatus,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;

    /// Hard-delete one message. Returns whether a row was removed.
    fn delete_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;

    /// Hard-delete every message of a conversation. Returns whether any row
    /// was removed.
    fn delete_by_conversation(
        &self,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;
}
