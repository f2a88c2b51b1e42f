//! Business logic and store trait definitions for missive.
//!
//! This crate defines the "ports" (store, push, and publish traits) that the
//! infrastructure layer implements, the in-process realizations of the push
//! and event channels, and the services orchestrating them. It depends only
//! on `missive-types` -- never on `missive-infra` or any database/IO crate.

pub mod block;
pub mod conversation;
pub mod event;
pub mod message;
pub mod push;
