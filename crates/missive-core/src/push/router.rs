//! In-process push router with per-user mailboxes and conversation topics.
//!
//! The `PushRouter` is the runtime hub for live message delivery. Each
//! attached user gets a bounded `mpsc` mailbox for messages addressed to
//! them. Conversation topics use `broadcast` for one-to-many delivery to
//! whoever is currently watching the conversation.

use std::sync::Arc;

use dashmap::DashMap;
use missive_types::error::PushError;
use missive_types::message::Message;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

use super::channel::PushChannel;

/// Buffer size for per-user direct mailboxes (mpsc).
const MAILBOX_BUFFER: usize = 256;

/// Buffer size for conversation topic broadcast channels.
const TOPIC_BUFFER: usize = 1024;

struct RouterInner {
    /// Per-user mailbox senders (user_id -> mpsc sender).
    mailboxes: DashMap<String, mpsc::Sender<Message>>,
    /// Per-conversation broadcast senders (topic key -> broadcast sender).
    topics: DashMap<String, broadcast::Sender<Message>>,
    mailbox_buffer: usize,
    topic_buffer: usize,
}

/// In-process router for live message delivery.
///
/// Provides two delivery modes:
/// - **Direct:** One-to-one via per-user `mpsc` mailboxes.
/// - **Topic:** One-to-many via per-conversation `broadcast` channels.
///
/// Cloning is cheap; clones share the same mailboxes and topics, so the
/// router can live in shared state while a clone rides inside the message
/// service.
#[derive(Clone)]
pub struct PushRouter {
    inner: Arc<RouterInner>,
}

impl PushRouter {
    /// Create a router with default buffer sizes.
    pub fn new() -> Self {
        Self::with_buffers(MAILBOX_BUFFER, TOPIC_BUFFER)
    }

    /// Create a router with explicit mailbox and topic buffer sizes.
    pub fn with_buffers(mailbox_buffer: usize, topic_buffer: usize) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                mailboxes: DashMap::new(),
                topics: DashMap::new(),
                mailbox_buffer,
                topic_buffer,
            }),
        }
    }

    /// Attach a user and return their mailbox receiver.
    ///
    /// The returned `mpsc::Receiver` carries messages addressed directly to
    /// the user. If the user is already attached, the old mailbox is
    /// replaced and its receiver stops yielding.
    pub fn attach_user(&self, user_id: &str) -> mpsc::Receiver<Message> {
        let (tx, rx) = mpsc::channel(self.inner.mailbox_buffer);
        self.inner.mailboxes.insert(user_id.to_string(), tx);
        debug!(%user_id, "attached user mailbox");
        rx
    }

    /// Detach a user, dropping their mailbox sender.
    ///
    /// Returns `true` if the user was attached.
    pub fn detach_user(&self, user_id: &str) -> bool {
        let removed = self.inner.mailboxes.remove(user_id).is_some();
        if removed {
            debug!(%user_id, "detached user mailbox");
        }
        removed
    }

    /// Check whether a user currently has a mailbox.
    pub fn is_attached(&self, user_id: &str) -> bool {
        self.inner.mailboxes.contains_key(user_id)
    }

    /// Subscribe to a conversation topic.
    ///
    /// Creates the topic if it does not exist. Returns a broadcast receiver
    /// for consuming undirected messages of that conversation.
    pub fn subscribe_topic(&self, topic_key: &str) -> broadcast::Receiver<Message> {
        let entry = self
            .inner
            .topics
            .entry(topic_key.to_string())
            .or_insert_with(|| {
                let (tx, _) = broadcast::channel(self.inner.topic_buffer);
                tx
            });
        entry.subscribe()
    }

    /// Number of users with an attached mailbox.
    pub fn attached_user_count(&self) -> usize {
        self.inner.mailboxes.len()
    }
}

impl PushChannel for PushRouter {
    async fn send_to_user(&self, user_id: &str, message: &Message) -> Result<(), PushError> {
        let sender = self
            .inner
            .mailboxes
            .get(user_id)
            .ok_or_else(|| PushError::NotRegistered(user_id.to_string()))?;

        sender.try_send(message.clone()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => PushError::MailboxFull(user_id.to_string()),
            mpsc::error::TrySendError::Closed(_) => {
                PushError::SendFailed(format!("mailbox closed for user {user_id}"))
            }
        })?;

        Ok(())
    }

    /// Delivers to all current topic subscribers. If the topic does not
    /// exist or has no subscribers, the message is silently dropped.
    async fn send_to_topic(&self, topic_key: &str, message: &Message) -> Result<(), PushError> {
        if let Some(sender) = self.inner.topics.get(topic_key) {
            match sender.send(message.clone()) {
                Ok(count) => {
                    debug!(%topic_key, count, "delivered message to topic");
                }
                Err(_) => {
                    // No active subscribers
                    debug!(%topic_key, "no active subscribers on topic");
                }
            }
        } else {
            debug!(%topic_key, "topic has no watchers, live delivery skipped");
        }
        Ok(())
    }
}

impl Default for PushRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PushRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushRouter")
            .field("attached_users", &self.inner.mailboxes.len())
            .field("topics", &self.inner.topics.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
