//! Conversation summary types for missive.
//!
//! Conversations are not stored: a summary is derived on demand from the
//! messages sharing a conversation id, from one viewer's perspective.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::MessageKind;

/// Per-viewer summary of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    /// Participant identities decoded from the conversation id, the viewer
    /// always listed first. A single entry means the counterpart could not
    /// be decoded.
    pub participants: Vec<String>,
    pub last_message: LastMessage,
    /// Messages the viewer has not read, under the rule: addressed to the
    /// viewer and not marked read, or undirected and not self-authored.
    pub unread_count: u64,
}

/// The newest message of a conversation, trimmed for listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMessage {
    pub id: String,
    pub sender_id: String,
    /// Placeholder-substituted when the message was recalled.
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
    pub recalled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_summary_serde_roundtrip() {
        let summary = ConversationSummary {
            conversation_id: "bella-tommy-chat".to_string(),
            participants: vec!["tommy".to_string(), "bella".to_string()],
            last_message: LastMessage {
                id: "m-9".to_string(),
                sender_id: "bella".to_string(),
                content: "see you tomorrow".to_string(),
                kind: MessageKind::Text,
                created_at: Utc::now(),
                recalled: false,
            },
            unread_count: 2,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"unread_count\":2"));
        assert!(json.contains("\"type\":\"text\""));
        let parsed: ConversationSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }
}
