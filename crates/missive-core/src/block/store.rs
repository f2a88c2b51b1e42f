//! Block store trait definition.
//!
//! Defines the storage interface for blocked-user relations. The
//! infrastructure layer (missive-infra) implements this trait with SQLite
//! persistence, where a unique index on the pair backs the idempotency of
//! repeated blocks.

use missive_types::block::BlockedUser;
use missive_types::error::StoreError;

/// Repository trait for blocked-user persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait BlockStore: Send + Sync {
    /// Persist a new block relation.
    fn insert(
        &self,
        entry: &BlockedUser,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Look up the relation for an exact (blocker, blocked) pair.
    fn find_pair(
        &self,
        user_id: &str,
        blocked_user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<BlockedUser>, StoreError>> + Send;

    /// All relations where the given user is the blocker, newest first.
    fn list_for_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<BlockedUser>, StoreError>> + Send;
}
