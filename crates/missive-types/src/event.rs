//! Event types for the missive event log.
//!
//! `MessageEvent` is the payload broadcast to downstream consumers when a
//! message is created. All fields are Clone + Send + Sync for use with
//! tokio broadcast channels.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Topic carrying message-creation events.
pub const MESSAGE_CREATED_TOPIC: &str = "message.created";

/// An event handed to the event publisher.
///
/// `partition_key` is the ordering key: consumers observing one key see
/// its events in publish order. For message-creation events it is the
/// conversation id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub topic: String,
    pub partition_key: String,
    pub payload: serde_json::Value,
}

impl MessageEvent {
    /// Builds a `message.created` event keyed by the message's conversation.
    pub fn message_created(message: &Message) -> Result<Self, serde_json::Error> {
        Ok(Self {
            topic: MESSAGE_CREATED_TOPIC.to_string(),
            partition_key: message.conversation_id.clone(),
            payload: serde_json::to_value(message)?,
        })
    }
}
