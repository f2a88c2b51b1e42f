//! Infrastructure layer for missive.
//!
//! Contains implementations of the store traits defined in `missive-core`:
//! SQLite persistence with split read/write pools, plus the configuration
//! loader.

pub mod config;
pub mod sqlite;
