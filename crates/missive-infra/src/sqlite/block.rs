//! SQLite block store implementation.
//!
//! Implements `BlockStore` from `missive-core`. The UNIQUE index on
//! (user_id, blocked_user_id) backs the service's find-then-insert under
//! concurrent blocks.

use chrono::{DateTime, Utc};
use missive_core::block::store::BlockStore;
use missive_types::block::BlockedUser;
use missive_types::error::StoreError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `BlockStore`.
pub struct SqliteBlockStore {
    pool: DatabasePool,
}

impl SqliteBlockStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct BlockedUserRow {
    id: String,
    user_id: String,
    blocked_user_id: String,
    blocked_at: String,
}

impl BlockedUserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            blocked_user_id: row.try_get("blocked_user_id")?,
            blocked_at: row.try_get("blocked_at")?,
        })
    }

    fn into_entry(self) -> Result<BlockedUser, StoreError> {
        let blocked_at = parse_datetime(&self.blocked_at)?;
        Ok(BlockedUser {
            id: self.id,
            user_id: self.user_id,
            blocked_user_id: self.blocked_user_id,
            blocked_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

impl BlockStore for SqliteBlockStore {
    async fn insert(&self, entry: &BlockedUser) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO blocked_users (id, user_id, blocked_user_id, blocked_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.blocked_user_id)
        .bind(entry.blocked_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find_pair(
        &self,
        user_id: &str,
        blocked_user_id: &str,
    ) -> Result<Option<BlockedUser>, StoreError> {
        let row =
            sqlx::query("SELECT * FROM blocked_users WHERE user_id = ? AND blocked_user_id = ?")
                .bind(user_id)
                .bind(blocked_user_id)
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let entry_row =
                    BlockedUserRow::from_row(&row).map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Some(entry_row.into_entry()?))
            }
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<BlockedUser>, StoreError> {
        let rows =
            sqlx::query("SELECT * FROM blocked_users WHERE user_id = ? ORDER BY blocked_at DESC")
                .bind(user_id)
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let entry_row =
                BlockedUserRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
            entries.push(entry_row.into_entry()?);
        }

        Ok(entries)
    }
}
