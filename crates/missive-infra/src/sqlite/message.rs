//! SQLite message store implementation.
//!
//! Implements `MessageStore` from `missive-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, reader pool for
//! SELECTs and writer pool for mutations.

use chrono::{DateTime, Utc};
use missive_core::message::store::{MessageStore, SortOrder};
use missive_types::error::StoreError;
use missive_types::message::{DeliveryStatus, Message, MessageKind};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageStore`.
pub struct SqliteMessageStore {
    pool: DatabasePool,
}

impl SqliteMessageStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: String,
    conversation_id: String,
    sender_id: String,
    receiver_id: Option<String>,
    content: String,
    kind: String,
    attachment_url: Option<String>,
    status: Option<String>,
    created_at: String,
    recalled: i64,
    recalled_at: Option<String>,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            sender_id: row.try_get("sender_id")?,
            receiver_id: row.try_get("receiver_id")?,
            content: row.try_get("content")?,
            kind: row.try_get("kind")?,
            attachment_url: row.try_get("attachment_url")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            recalled: row.try_get("recalled")?,
            recalled_at: row.try_get("recalled_at")?,
        })
    }

    fn into_message(self) -> Result<Message, StoreError> {
        let created_at = parse_datetime(&self.created_at)?;
        let recalled_at = self
            .recalled_at
            .as_deref()
            .map(parse_datetime)
            .transpose()?;

        Ok(Message {
            id: self.id,
            conversation_id: self.conversation_id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            content: self.content,
            kind: MessageKind::from(self.kind),
            attachment_url: self.attachment_url,
            status: self.status.map(DeliveryStatus::from),
            created_at,
            recalled: self.recalled != 0,
            recalled_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn rows_into_messages(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Message>, StoreError> {
    let mut messages = Vec::with_capacity(rows.len());
    for row in rows {
        let msg_row = MessageRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
        messages.push(msg_row.into_message()?);
    }
    Ok(messages)
}

// ---------------------------------------------------------------------------
// MessageStore implementation
// ---------------------------------------------------------------------------

impl MessageStore for SqliteMessageStore {
    async fn put(&self, message: &Message) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO messages (id, conversation_id, sender_id, receiver_id, content, kind, attachment_url, status, created_at, recalled, recalled_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&message.id)
        .bind(&message.conversation_id)
        .bind(&message.sender_id)
        .bind(&message.receiver_id)
        .bind(&message.content)
        .bind(message.kind.as_str())
        .bind(&message.attachment_url)
        .bind(message.status.as_ref().map(|s| s.as_str()))
        .bind(format_datetime(&message.created_at))
        .bind(message.recalled)
        .bind(message.recalled_at.as_ref().map(format_datetime))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let msg_row =
                    MessageRow::from_row(&row).map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Some(msg_row.into_message()?))
            }
            None => Ok(None),
        }
    }

    async fn get_recent_by_conversation(
        &self,
        conversation_id: &str,
        order: SortOrder,
        limit: i64,
    ) -> Result<Vec<Message>, StoreError> {
        // The window always covers the most recent rows; for ascending
        // presentation the descending window is re-sorted.
        let sql = match order {
            SortOrder::Descending => {
                r#"SELECT * FROM messages WHERE conversation_id = ?
                   ORDER BY created_at DESC, id DESC LIMIT ?"#
            }
            SortOrder::Ascending => {
                r#"SELECT * FROM (
                       SELECT * FROM messages WHERE conversation_id = ?
                       ORDER BY created_at DESC, id DESC LIMIT ?
                   ) ORDER BY created_at ASC, id ASC"#
            }
        };

        let rows = sqlx::query(sql)
            .bind(conversation_id)
            .bind(limit)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        rows_into_messages(&rows)
    }

    async fn get_recent_by_participant(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT * FROM messages WHERE sender_id = ? OR receiver_id = ?
               ORDER BY created_at DESC, id DESC LIMIT ?"#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        rows_into_messages(&rows)
    }

    async fn mark_recalled(&self, id: &str, at: DateTime<Utc>) -> Result<bool, StoreError> {
        // The recalled guard makes the transition one-way and keeps the
        // first recalled_at on repeat calls.
        let result = sqlx::query(
            "UPDATE messages SET recalled = 1, recalled_at = ? WHERE id = ? AND recalled = 0",
        )
        .bind(format_datetime(&at))
        .bind(id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_status(&self, id: &str, status: &DeliveryStatus) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE messages SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_conversation(&self, conversation_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM messages WHERE conversation_id = ?")
            .bind(conversation_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
