//! Live delivery of stored messages.
//!
//! The write path hands every stored message to a [`PushChannel`]. The
//! in-process [`PushRouter`] implementation fans out via per-user mailboxes
//! and per-conversation broadcast topics.

pub mod channel;
pub mod router;

pub use channel::PushChannel;
pub use router::PushRouter;
