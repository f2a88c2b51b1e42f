//! Block relation types for missive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A block relation: `user_id` has blocked `blocked_user_id`.
///
/// Unique on the (user_id, blocked_user_id) pair. The relation is managed
/// by the block service; message delivery does not consult it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedUser {
    pub id: String,
    pub user_id: String,
    pub blocked_user_id: String,
    pub blocked_at: DateTime<Utc>,
}
