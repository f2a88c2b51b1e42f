//! Global configuration types for missive.
//!
//! `AppConfig` represents the top-level `config.toml` that controls the
//! server bind address, database location, and channel capacities.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the missive server.
///
/// Loaded from `~/.missive/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Overrides the SQLite database location when set.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Capacity of each per-user push mailbox.
    #[serde(default = "default_mailbox_buffer")]
    pub mailbox_buffer: usize,

    /// Capacity of each conversation topic channel.
    #[serde(default = "default_topic_buffer")]
    pub topic_buffer: usize,

    /// Capacity of the local event log.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_mailbox_buffer() -> usize {
    256
}

fn default_topic_buffer() -> usize {
    1024
}

fn default_event_capacity() -> usize {
    1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            mailbox_buffer: default_mailbox_buffer(),
            topic_buffer: default_topic_buffer(),
            event_capacity: default_event_capacity(),
        }
    }
}
