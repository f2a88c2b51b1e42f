//! Downstream event publication.
//!
//! Storing a message emits a `message.created` event through an
//! [`EventPublisher`]. The in-process [`LocalEventLog`] implementation
//! broadcasts to in-process subscribers; a brokered implementation can take
//! its place without touching the write path.

pub mod log;
pub mod publisher;

pub use log::LocalEventLog;
pub use publisher::EventPublisher;
