//! Event publisher trait definition.
//!
//! Defines the interface for handing message events to downstream
//! consumers. The write path treats publication as best-effort and records
//! the outcome on the save receipt.

use missive_types::error::PublishError;
use missive_types::event::MessageEvent;

/// Publisher for downstream message events.
///
/// Implementations must preserve publication order between events that
/// share a partition key.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait EventPublisher: Send + Sync {
    /// Publish one event.
    fn publish(
        &self,
        event: MessageEvent,
    ) -> impl std::future::Future<Output = Result<(), PublishError>> + Send;
}
