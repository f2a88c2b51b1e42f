//! Blocked-user management service.

use chrono::Utc;
use missive_types::block::BlockedUser;
use missive_types::error::BlockError;
use tracing::info;
use uuid::Uuid;

use crate::block::store::BlockStore;

/// Service managing who has blocked whom.
///
/// Blocking is idempotent: repeating an existing pair returns the stored
/// relation instead of creating a duplicate. The message write path never
/// consults this service; blocks only shape what clients choose to show.
pub struct BlockService<B: BlockStore> {
    store: B,
}

impl<B: BlockStore> BlockService<B> {
    /// Create a new block service.
    pub fn new(store: B) -> Self {
        Self { store }
    }

    /// Record that `user_id` blocks `blocked_user_id`.
    ///
    /// Returns the stored relation, existing or new. Both ids must be
    /// non-empty after trimming.
    pub async fn block(
        &self,
        user_id: &str,
        blocked_user_id: &str,
    ) -> Result<BlockedUser, BlockError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(BlockError::Validation(
                "user id must not be empty".to_string(),
            ));
        }
        let blocked_user_id = blocked_user_id.trim();
        if blocked_user_id.is_empty() {
            return Err(BlockError::Validation(
                "blocked user id must not be empty".to_string(),
            ));
        }

        if let Some(existing) = self.store.find_pair(user_id, blocked_user_id).await? {
            return Ok(existing);
        }

        let entry = BlockedUser {
            id: Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            blocked_user_id: blocked_user_id.to_string(),
            blocked_at: Utc::now(),
        };
        self.store.insert(&entry).await?;
        info!(user_id = %entry.user_id, blocked_user_id = %entry.blocked_user_id, "user blocked");
        Ok(entry)
    }

    /// Whether `user_id` has blocked `blocked_user_id`.
    pub async fn is_blocked(
        &self,
        user_id: &str,
        blocked_user_id: &str,
    ) -> Result<bool, BlockError> {
        Ok(self
            .store
            .find_pair(user_id.trim(), blocked_user_id.trim())
            .await?
            .is_some())
    }

    /// Everyone the given user has blocked, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<BlockedUser>, BlockError> {
        Ok(self.store.list_for_user(user_id.trim()).await?)
    }
}
