//! Message service orchestrating the write path and the derived read paths.
//!
//! `save` treats persistence as the single source of truth: a message
//! counts as sent once the store write succeeds. Push delivery and event
//! publication run after the write; their failures are logged and recorded
//! on the receipt, never surfaced to the caller.

use chrono::Utc;
use missive_types::conversation::ConversationSummary;
use missive_types::error::MessageError;
use missive_types::event::MessageEvent;
use missive_types::message::{DeliveryStatus, Message, MessageDraft, SaveReceipt};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::conversation::aggregate;
use crate::event::EventPublisher;
use crate::message::store::{MessageStore, SortOrder};
use crate::push::PushChannel;

/// Fixed window size for recent-message queries.
pub const RECENT_WINDOW: i64 = 100;

/// Orchestrates validation, persistence, push delivery, and event
/// publication for messages, and owns the recall/delete operations.
///
/// Generic over its collaborators to maintain clean architecture
/// (missive-core never depends on missive-infra) and so the push and
/// publish channels can be swapped for test doubles.
pub struct MessageService<S: MessageStore, P: PushChannel, E: EventPublisher> {
    store: S,
    push: P,
    events: E,
}

impl<S: MessageStore, P: PushChannel, E: EventPublisher> MessageService<S, P, E> {
    /// Create a new message service with the given collaborators.
    pub fn new(store: S, push: P, events: E) -> Self {
        Self {
            store,
            push,
            events,
        }
    }

    /// Access the message store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Write path ---

    /// Validates, persists, and fans out one message.
    ///
    /// Validation failures reject the draft before any side effect. A store
    /// failure aborts the operation with no push or publish attempt. Push
    /// and publish failures only flip the receipt's advisory flags.
    ///
    /// The echoed token is the caller's `idempotency_token` when present,
    /// else the assigned message id.
    pub async fn save(
        &self,
        draft: MessageDraft,
        idempotency_token: Option<String>,
    ) -> Result<SaveReceipt, MessageError> {
        let conversation_id = draft.conversation_id.trim();
        if conversation_id.is_empty() {
            return Err(MessageError::Validation(
                "conversation id must not be empty".to_string(),
            ));
        }
        let sender_id = draft.sender_id.trim();
        if sender_id.is_empty() {
            return Err(MessageError::Validation(
                "sender id must not be empty".to_string(),
            ));
        }

        let id = match draft.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::now_v7().to_string(),
        };

        let message = Message {
            id,
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: draft.receiver_id,
            content: draft.content,
            kind: draft.kind,
            attachment_url: draft.attachment_url,
            status: draft.status,
            created_at: Utc::now(),
            recalled: false,
            recalled_at: None,
        };

        self.store.put(&message).await?;
        debug!(message_id = %message.id, conversation_id = %message.conversation_id, "message stored");

        let pushed = self.push_stored(&message).await;
        let published = self.publish_created(&message).await;

        let echo_token = idempotency_token.unwrap_or_else(|| message.id.clone());
        Ok(SaveReceipt {
            message,
            echo_token,
            pushed,
            published,
        })
    }

    /// Best-effort live delivery of a stored message. A receiver id selects
    /// that user's private mailbox; otherwise the conversation topic is
    /// used. Returns whether the handoff succeeded.
    async fn push_stored(&self, message: &Message) -> bool {
        let result = match &message.receiver_id {
            Some(receiver_id) => self.push.send_to_user(receiver_id, message).await,
            None => {
                self.push
                    .send_to_topic(&message.conversation_id, message)
                    .await
            }
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    message_id = %message.id,
                    error = %e,
                    "push delivery failed; message remains stored"
                );
                false
            }
        }
    }

    /// Best-effort publication of the created event, keyed by conversation.
    /// Returns whether the handoff succeeded.
    async fn publish_created(&self, message: &Message) -> bool {
        let event = match MessageEvent::message_created(message) {
            Ok(event) => event,
            Err(e) => {
                warn!(message_id = %message.id, error = %e, "could not encode created event");
                return false;
            }
        };

        match self.events.publish(event).await {
            Ok(()) => true,
            Err(e) => {
                warn!(message_id = %message.id, error = %e, "event publication failed");
                false
            }
        }
    }

    /// Marks a message recalled, stamping `recalled_at` on the transition.
    ///
    /// Returns false when the message is missing or already recalled; the
    /// original `recalled_at` survives repeat calls. No push or publish is
    /// re-triggered: recall is a read-time substitution concern.
    pub async fn recall(&self, message_id: &str) -> Result<bool, MessageError> {
        let changed = self.store.mark_recalled(message_id, Utc::now()).await?;
        if changed {
            debug!(message_id = %message_id, "message recalled");
        }
        Ok(changed)
    }

    /// Records a delivery acknowledgment. Returns false when the message
    /// does not exist.
    pub async fn update_status(
        &self,
        message_id: &str,
        status: DeliveryStatus,
    ) -> Result<bool, MessageError> {
        Ok(self.store.update_status(message_id, &status).await?)
    }

    /// Hard-deletes one message. Returns false when nothing matched.
    pub async fn delete(&self, message_id: &str) -> Result<bool, MessageError> {
        Ok(self.store.delete_by_id(message_id).await?)
    }

    /// Hard-deletes every message of a conversation. Returns false when the
    /// conversation had no messages.
    pub async fn delete_all_by_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<bool, MessageError> {
        Ok(self.store.delete_by_conversation(conversation_id).await?)
    }

    // --- Read paths ---

    /// The most recent `RECENT_WINDOW` messages of a conversation in
    /// ascending creation order, recalled content substituted.
    pub async fn get_history(&self, conversation_id: &str) -> Result<Vec<Message>, MessageError> {
        let mut messages = self
            .store
            .get_recent_by_conversation(conversation_id, SortOrder::Ascending, RECENT_WINDOW)
            .await?;
        for message in &mut messages {
            message.redact();
        }
        Ok(messages)
    }

    /// The most recent `RECENT_WINDOW` messages where the user is sender or
    /// receiver, newest first, recalled content substituted.
    pub async fn get_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>, MessageError> {
        let mut messages = self
            .store
            .get_recent_by_participant(user_id, RECENT_WINDOW)
            .await?;
        for message in &mut messages {
            message.redact();
        }
        Ok(messages)
    }

    /// Per-viewer conversation summaries derived from the user's recent
    /// messages.
    ///
    /// Degrades to an empty list instead of surfacing internal failures: a
    /// partial view beats an error on this read path.
    pub async fn list_conversations(&self, user_id: &str) -> Vec<ConversationSummary> {
        match self
            .store
            .get_recent_by_participant(user_id, RECENT_WINDOW)
            .await
        {
            Ok(messages) => aggregate::summarize(user_id, &messages),
            Err(e) => {
                error!(user_id = %user_id, error = %e, "conversation listing degraded to empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use missive_types::error::{PushError, PublishError, StoreError};
    use missive_types::event::MESSAGE_CREATED_TOPIC;
    use missive_types::message::{MessageKind, RECALLED_CONTENT};
    use std::sync::{Arc, Mutex};

    // --- In-memory doubles ---

    /// Message store backed by a shared Vec. Clones observe the same rows,
    /// so a test can keep a handle after moving one into the service.
    #[derive(Clone, Default)]
    struct MemoryStore {
        rows: Arc<Mutex<Vec<Message>>>,
        fail_writes: bool,
        fail_reads: bool,
    }

    impl MemoryStore {
        fn failing_writes() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        fn failing_reads() -> Self {
            Self {
                fail_reads: true,
                ..Self::default()
            }
        }

        fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn sorted_desc(&self) -> Vec<Message> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            });
            rows
        }
    }

    impl MessageStore for MemoryStore {
        async fn put(&self, message: &Message) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Query("disk full".to_string()));
            }
            self.rows.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn get_by_id(&self, id: &str) -> Result<Option<Message>, StoreError> {
            if self.fail_reads {
                return Err(StoreError::Connection);
            }
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id == id)
                .cloned())
        }

        async fn get_recent_by_conversation(
            &self,
            conversation_id: &str,
            order: SortOrder,
            limit: i64,
        ) -> Result<Vec<Message>, StoreError> {
            if self.fail_reads {
                return Err(StoreError::Connection);
            }
            let mut window: Vec<Message> = self
                .sorted_desc()
                .into_iter()
                .filter(|m| m.conversation_id == conversation_id)
                .take(limit as usize)
                .collect();
            if order == SortOrder::Ascending {
                window.reverse();
            }
            Ok(window)
        }

        async fn get_recent_by_participant(
            &self,
            user_id: &str,
            limit: i64,
        ) -> Result<Vec<Message>, StoreError> {
            if self.fail_reads {
                return Err(StoreError::Connection);
            }
            Ok(self
                .sorted_desc()
                .into_iter()
                .filter(|m| {
                    m.sender_id == user_id || m.receiver_id.as_deref() == Some(user_id)
                })
                .take(limit as usize)
                .collect())
        }

        async fn mark_recalled(
            &self,
            id: &str,
            at: chrono::DateTime<Utc>,
        ) -> Result<bool, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|m| m.id == id && !m.recalled) {
                Some(row) => {
                    row.recalled = true;
                    row.recalled_at = Some(at);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn update_status(
            &self,
            id: &str,
            status: &DeliveryStatus,
        ) -> Result<bool, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|m| m.id == id) {
                Some(row) => {
                    row.status = Some(status.clone());
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|m| m.id != id);
            Ok(rows.len() < before)
        }

        async fn delete_by_conversation(
            &self,
            conversation_id: &str,
        ) -> Result<bool, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|m| m.conversation_id != conversation_id);
            Ok(rows.len() < before)
        }
    }

    /// Push double recording each handoff.
    #[derive(Clone, Default)]
    struct RecordingPush {
        to_users: Arc<Mutex<Vec<(String, String)>>>,
        to_topics: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl PushChannel for RecordingPush {
        async fn send_to_user(&self, user_id: &str, message: &Message) -> Result<(), PushError> {
            self.to_users
                .lock()
                .unwrap()
                .push((user_id.to_string(), message.id.clone()));
            Ok(())
        }

        async fn send_to_topic(&self, topic_key: &str, message: &Message) -> Result<(), PushError> {
            self.to_topics
                .lock()
                .unwrap()
                .push((topic_key.to_string(), message.id.clone()));
            Ok(())
        }
    }

    /// Push double simulating a down channel.
    #[derive(Clone, Default)]
    struct FailingPush;

    impl PushChannel for FailingPush {
        async fn send_to_user(&self, user_id: &str, _message: &Message) -> Result<(), PushError> {
            Err(PushError::NotRegistered(user_id.to_string()))
        }

        async fn send_to_topic(&self, _topic: &str, _message: &Message) -> Result<(), PushError> {
            Err(PushError::SendFailed("channel down".to_string()))
        }
    }

    /// Publisher double recording each event.
    #[derive(Clone, Default)]
    struct RecordingPublisher {
        events: Arc<Mutex<Vec<MessageEvent>>>,
    }

    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, event: MessageEvent) -> Result<(), PublishError> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    /// Publisher double simulating a down broker.
    #[derive(Clone, Default)]
    struct FailingPublisher;

    impl EventPublisher for FailingPublisher {
        async fn publish(&self, _event: MessageEvent) -> Result<(), PublishError> {
            Err(PublishError::Failed("broker offline".to_string()))
        }
    }

    fn draft(conversation_id: &str, sender_id: &str) -> MessageDraft {
        MessageDraft {
            id: None,
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: None,
            content: "hello".to_string(),
            kind: MessageKind::Text,
            attachment_url: None,
            status: None,
        }
    }

    fn service(
        store: MemoryStore,
    ) -> MessageService<MemoryStore, RecordingPush, RecordingPublisher> {
        MessageService::new(store, RecordingPush::default(), RecordingPublisher::default())
    }

    // --- Save ---

    #[tokio::test]
    async fn save_persists_and_assigns_id_and_timestamp() {
        let store = MemoryStore::default();
        let svc = service(store.clone());

        let receipt = svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();

        assert!(!receipt.message.id.is_empty());
        let stored = svc
            .store()
            .get_by_id(&receipt.message.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, receipt.message);
        assert_eq!(stored.conversation_id, "alice-bob-chat");
        assert!(!stored.recalled);
        assert_eq!(store.row_count(), 1);
    }

    #[tokio::test]
    async fn save_keeps_client_supplied_id() {
        let svc = service(MemoryStore::default());
        let mut d = draft("alice-bob-chat", "alice");
        d.id = Some("client-42".to_string());

        let receipt = svc.save(d, None).await.unwrap();
        assert_eq!(receipt.message.id, "client-42");
    }

    #[tokio::test]
    async fn save_rejects_empty_conversation_id_without_side_effects() {
        let store = MemoryStore::default();
        let push = RecordingPush::default();
        let events = RecordingPublisher::default();
        let svc = MessageService::new(store.clone(), push.clone(), events.clone());

        let result = svc.save(draft("   ", "alice"), None).await;

        assert!(matches!(result, Err(MessageError::Validation(_))));
        assert_eq!(store.row_count(), 0);
        assert!(push.to_users.lock().unwrap().is_empty());
        assert!(push.to_topics.lock().unwrap().is_empty());
        assert!(events.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_rejects_empty_sender_id() {
        let store = MemoryStore::default();
        let svc = service(store.clone());

        let result = svc.save(draft("alice-bob-chat", ""), None).await;

        assert!(matches!(result, Err(MessageError::Validation(_))));
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn save_echoes_caller_token() {
        let svc = service(MemoryStore::default());
        let receipt = svc
            .save(draft("alice-bob-chat", "alice"), Some("tok1".to_string()))
            .await
            .unwrap();
        assert_eq!(receipt.echo_token, "tok1");
    }

    #[tokio::test]
    async fn save_echoes_assigned_id_without_token() {
        let svc = service(MemoryStore::default());
        let receipt = svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();
        assert_eq!(receipt.echo_token, receipt.message.id);
    }

    #[tokio::test]
    async fn save_pushes_to_receiver_mailbox() {
        let push = RecordingPush::default();
        let svc = MessageService::new(
            MemoryStore::default(),
            push.clone(),
            RecordingPublisher::default(),
        );

        let mut d = draft("alice-bob-chat", "alice");
        d.receiver_id = Some("bob".to_string());
        let receipt = svc.save(d, None).await.unwrap();

        assert!(receipt.pushed);
        let to_users = push.to_users.lock().unwrap();
        assert_eq!(to_users.len(), 1);
        assert_eq!(to_users[0].0, "bob");
        assert!(push.to_topics.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_broadcasts_to_topic_without_receiver() {
        let push = RecordingPush::default();
        let svc = MessageService::new(
            MemoryStore::default(),
            push.clone(),
            RecordingPublisher::default(),
        );

        let receipt = svc.save(draft("team-room", "alice"), None).await.unwrap();

        assert!(receipt.pushed);
        let to_topics = push.to_topics.lock().unwrap();
        assert_eq!(to_topics.len(), 1);
        assert_eq!(to_topics[0].0, "team-room");
        assert!(push.to_users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_publishes_event_keyed_by_conversation() {
        let events = RecordingPublisher::default();
        let svc = MessageService::new(
            MemoryStore::default(),
            RecordingPush::default(),
            events.clone(),
        );

        let receipt = svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();

        assert!(receipt.published);
        let published = events.events.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].topic, MESSAGE_CREATED_TOPIC);
        assert_eq!(published[0].partition_key, "alice-bob-chat");
        assert_eq!(published[0].payload["id"], receipt.message.id.as_str());
    }

    #[tokio::test]
    async fn push_failure_does_not_fail_save() {
        let store = MemoryStore::default();
        let svc = MessageService::new(store.clone(), FailingPush, RecordingPublisher::default());

        let mut d = draft("alice-bob-chat", "alice");
        d.receiver_id = Some("bob".to_string());
        let receipt = svc.save(d, None).await.unwrap();

        assert!(!receipt.pushed);
        assert!(receipt.published);
        assert_eq!(store.row_count(), 1);
    }

    #[tokio::test]
    async fn publish_failure_does_not_fail_save() {
        let store = MemoryStore::default();
        let svc = MessageService::new(store.clone(), RecordingPush::default(), FailingPublisher);

        let receipt = svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();

        assert!(receipt.pushed);
        assert!(!receipt.published);
        assert_eq!(store.row_count(), 1);
    }

    #[tokio::test]
    async fn store_failure_aborts_before_push_and_publish() {
        let push = RecordingPush::default();
        let events = RecordingPublisher::default();
        let svc = MessageService::new(MemoryStore::failing_writes(), push.clone(), events.clone());

        let result = svc.save(draft("alice-bob-chat", "alice"), None).await;

        assert!(matches!(result, Err(MessageError::Storage(_))));
        assert!(push.to_users.lock().unwrap().is_empty());
        assert!(push.to_topics.lock().unwrap().is_empty());
        assert!(events.events.lock().unwrap().is_empty());
    }

    // --- Recall ---

    #[tokio::test]
    async fn recall_twice_changes_only_once() {
        let store = MemoryStore::default();
        let svc = service(store.clone());
        let receipt = svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();
        let id = receipt.message.id;

        assert!(svc.recall(&id).await.unwrap());
        let first_recalled_at = store.rows.lock().unwrap()[0].recalled_at;
        assert!(first_recalled_at.is_some());

        assert!(!svc.recall(&id).await.unwrap());
        let second_recalled_at = store.rows.lock().unwrap()[0].recalled_at;
        assert_eq!(first_recalled_at, second_recalled_at);
    }

    #[tokio::test]
    async fn recall_missing_message_returns_false() {
        let svc = service(MemoryStore::default());
        assert!(!svc.recall("nope").await.unwrap());
    }

    #[tokio::test]
    async fn history_substitutes_placeholder_after_recall() {
        let svc = service(MemoryStore::default());
        let receipt = svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();
        svc.recall(&receipt.message.id).await.unwrap();

        let history = svc.get_history("alice-bob-chat").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, RECALLED_CONTENT);
        assert!(history[0].recalled);
        // Stored payload is retained, not erased.
        assert_eq!(
            svc.store().rows.lock().unwrap()[0].content,
            "hello".to_string()
        );
    }

    // --- Read paths ---

    #[tokio::test]
    async fn history_is_ascending() {
        let svc = service(MemoryStore::default());
        for i in 0..3 {
            let mut d = draft("alice-bob-chat", "alice");
            d.id = Some(format!("m-{i}"));
            d.content = format!("msg {i}");
            svc.save(d, None).await.unwrap();
        }

        let history = svc.get_history("alice-bob-chat").await.unwrap();
        let ids: Vec<&str> = history.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m-0", "m-1", "m-2"]);
    }

    #[tokio::test]
    async fn user_feed_is_descending_and_scoped_to_participant() {
        let svc = service(MemoryStore::default());
        for i in 0..2 {
            let mut d = draft("alice-bob-chat", "alice");
            d.id = Some(format!("m-{i}"));
            d.receiver_id = Some("bob".to_string());
            svc.save(d, None).await.unwrap();
        }
        // A conversation bob is not part of.
        svc.save(draft("carol-dave-chat", "carol"), None).await.unwrap();

        let feed = svc.get_messages_for_user("bob").await.unwrap();
        let ids: Vec<&str> = feed.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m-1", "m-0"]);
    }

    #[tokio::test]
    async fn update_status_missing_returns_false() {
        let svc = service(MemoryStore::default());
        assert!(!svc
            .update_status("nope", DeliveryStatus::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn update_status_records_acknowledgment() {
        let svc = service(MemoryStore::default());
        let receipt = svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();

        assert!(svc
            .update_status(&receipt.message.id, DeliveryStatus::Read)
            .await
            .unwrap());
        let stored = svc
            .store()
            .get_by_id(&receipt.message.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, Some(DeliveryStatus::Read));
    }

    // --- Delete ---

    #[tokio::test]
    async fn delete_returns_false_when_missing() {
        let svc = service(MemoryStore::default());
        assert!(!svc.delete("nope").await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let svc = service(MemoryStore::default());
        let receipt = svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();

        assert!(svc.delete(&receipt.message.id).await.unwrap());
        assert!(svc
            .store()
            .get_by_id(&receipt.message.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_all_by_conversation_bools() {
        let svc = service(MemoryStore::default());
        assert!(!svc.delete_all_by_conversation("empty-room").await.unwrap());

        svc.save(draft("alice-bob-chat", "alice"), None).await.unwrap();
        svc.save(draft("alice-bob-chat", "bob"), None).await.unwrap();

        assert!(svc.delete_all_by_conversation("alice-bob-chat").await.unwrap());
        assert!(svc.get_history("alice-bob-chat").await.unwrap().is_empty());
    }

    // --- Conversation listing ---

    #[tokio::test]
    async fn list_conversations_builds_summaries() {
        let svc = service(MemoryStore::default());
        let mut d = draft("alice-bob-chat", "alice");
        d.receiver_id = Some("bob".to_string());
        svc.save(d, None).await.unwrap();

        let summaries = svc.list_conversations("bob").await;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].conversation_id, "alice-bob-chat");
        assert_eq!(summaries[0].participants, vec!["bob", "alice"]);
        assert_eq!(summaries[0].unread_count, 1);
    }

    #[tokio::test]
    async fn list_conversations_degrades_to_empty_on_store_error() {
        let svc = MessageService::new(
            MemoryStore::failing_reads(),
            RecordingPush::default(),
            RecordingPublisher::default(),
        );
        assert!(svc.list_conversations("bob").await.is_empty());
    }
}
