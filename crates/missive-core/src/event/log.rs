//! Broadcast event log for distributing `MessageEvent` to multiple subscribers.
//!
//! Built on `tokio::sync::broadcast`, the `LocalEventLog` supports multiple
//! concurrent subscribers. Publishing with no active subscribers is a no-op.

use missive_types::error::PublishError;
use missive_types::event::MessageEvent;
use tokio::sync::broadcast;

use super::publisher::EventPublisher;

/// Multi-consumer log for message events.
///
/// Wraps a `tokio::sync::broadcast` channel. Cloning the log clones the
/// sender, allowing multiple producers and consumers. A single channel
/// serializes all sends, so events that share a partition key are observed
/// in publication order.
pub struct LocalEventLog {
    sender: broadcast::Sender<MessageEvent>,
}

impl LocalEventLog {
    /// Create a new event log with the given channel capacity.
    ///
    /// A capacity of 1024 is recommended for typical deployments.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<MessageEvent> {
        self.sender.subscribe()
    }

    /// Access the underlying broadcast sender.
    pub fn sender(&self) -> &broadcast::Sender<MessageEvent> {
        &self.sender
    }
}

impl EventPublisher for LocalEventLog {
    /// Publish an event to all current subscribers.
    ///
    /// If there are no subscribers, the event is silently dropped.
    async fn publish(&self, event: MessageEvent) -> Result<(), PublishError> {
        let _ = self.sender.send(event);
        Ok(())
    }
}

impl Clone for LocalEventLog {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for LocalEventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEventLog")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
