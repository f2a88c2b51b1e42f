//! Message domain types for missive.
//!
//! A `Message` is the unit of communication: durably stored, pushed to a
//! live recipient, and published as an event. `MessageDraft` is the inbound
//! shape before the server assigns identity and timestamp; `SaveReceipt`
//! is the save result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Placeholder exposed in place of a recalled message's content.
///
/// The stored content is retained unchanged; substitution happens on every
/// read path.
pub const RECALLED_CONTENT: &str = "This message has been recalled";

/// Kind of payload a message carries.
///
/// Open string enum: kinds this build does not know about survive a
/// store-and-serve roundtrip as `Other` instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    Text,
    Image,
    Voice,
    Sticker,
    Other(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
            MessageKind::Voice => "voice",
            MessageKind::Sticker => "sticker",
            MessageKind::Other(s) => s,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for MessageKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" => MessageKind::Text,
            "image" => MessageKind::Image,
            "voice" => MessageKind::Voice,
            "sticker" => MessageKind::Sticker,
            _ => MessageKind::Other(s),
        }
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Default for MessageKind {
    fn default() -> Self {
        MessageKind::Text
    }
}

/// Delivery status of a message, as acknowledged by the receiving side.
///
/// Open string enum for the same reason as [`MessageKind`]: unrecognized
/// statuses are carried through verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
    Other(String),
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Read => "read",
            DeliveryStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for DeliveryStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "sent" => DeliveryStatus::Sent,
            "delivered" => DeliveryStatus::Delivered,
            "read" => DeliveryStatus::Read,
            _ => DeliveryStatus::Other(s),
        }
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Default for DeliveryStatus {
    fn default() -> Self {
        DeliveryStatus::Sent
    }
}

/// A single chat message.
///
/// `conversation_id` and `sender_id` are always non-empty. `created_at` is
/// server-assigned and immutable. `recalled` is monotonic: once true it
/// never reverts, and `recalled_at` records the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque unique id. Client-supplied for idempotent retry, otherwise
    /// server-generated at save time.
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    /// Present for 1:1 delivery; absent for group/broadcast messages.
    pub receiver_id: Option<String>,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub attachment_url: Option<String>,
    pub status: Option<DeliveryStatus>,
    pub created_at: DateTime<Utc>,
    pub recalled: bool,
    /// Set exactly once, when `recalled` transitions false to true.
    pub recalled_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Content as readers may see it: the fixed placeholder when recalled,
    /// the stored content otherwise.
    pub fn visible_content(&self) -> &str {
        if self.recalled {
            RECALLED_CONTENT
        } else {
            &self.content
        }
    }

    /// Substitutes the placeholder in place when this message is recalled.
    pub fn redact(&mut self) {
        if self.recalled {
            self.content = RECALLED_CONTENT.to_string();
        }
    }

    /// Copy of this message with recalled content substituted, suitable for
    /// serving to clients.
    pub fn redacted(&self) -> Message {
        let mut copy = self.clone();
        copy.redact();
        copy
    }
}

/// An inbound message before the server assigns id and timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageDraft {
    /// Pre-generated id, if the client supplied one.
    #[serde(default)]
    pub id: Option<String>,
    pub conversation_id: String,
    pub sender_id: String,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub status: Option<DeliveryStatus>,
}

/// Result of a successful save.
///
/// The durable outcome (the stored message and the echoed token) is kept
/// separate from the advisory outcomes (`pushed`, `published`): a false
/// advisory flag means that side effect failed or was skipped, never that
/// the save failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub message: Message,
    /// The caller-supplied idempotency token if one was given, else the
    /// assigned message id. Lets the caller reconcile an optimistic local
    /// echo with the stored record.
    pub echo_token: String,
    pub pushed: bool,
    pub published: bool,
}
