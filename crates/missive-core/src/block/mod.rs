//! Blocked-user relations.
//!
//! Users can block other users; the relation is unique per (blocker,
//! blocked) pair. The block list is managed here and surfaced over the API.
//! Message delivery does not consult it.

pub mod service;
pub mod store;

pub use service::BlockService;
pub use store::BlockStore;
