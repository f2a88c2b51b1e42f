//! Message orchestration: the store port and the message service.
//!
//! - `store` -- `MessageStore` trait the infrastructure layer implements
//! - `service` -- `MessageService` orchestrating validation, persistence,
//!   push delivery, and event publication

pub mod service;
pub mod store;

pub use service::MessageService;
pub use store::{MessageStore, SortOrder};
