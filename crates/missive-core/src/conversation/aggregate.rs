//! Pure conversation summarization over a message snapshot.
//!
//! `summarize` needs no store access: the service fetches the viewer's
//! recent messages once and hands the slice here, which keeps grouping,
//! last-message selection, and unread counting testable in isolation.

use std::collections::HashMap;

use missive_types::conversation::{ConversationSummary, LastMessage};
use missive_types::message::{DeliveryStatus, Message};

use crate::conversation::key;

/// Builds per-viewer conversation summaries from a snapshot of messages.
///
/// Messages are grouped by conversation id. Per group the last message is
/// the one with the maximum creation timestamp, ties broken by the
/// lexicographically greater id. Summaries are sorted newest first with the
/// same tie-break. Recalled content is placeholder-substituted.
pub fn summarize(viewer_id: &str, messages: &[Message]) -> Vec<ConversationSummary> {
    let mut groups: HashMap<&str, Vec<&Message>> = HashMap::new();
    for message in messages {
        groups
            .entry(message.conversation_id.as_str())
            .or_default()
            .push(message);
    }

    let mut summaries: Vec<ConversationSummary> = groups
        .into_iter()
        .filter_map(|(conversation_id, group)| {
            let last = group.iter().copied().max_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            })?;

            let unread_count = group
                .iter()
                .filter(|message| is_unread_for(message, viewer_id))
                .count() as u64;

            Some(ConversationSummary {
                conversation_id: conversation_id.to_string(),
                participants: key::parse_participants(conversation_id, viewer_id),
                last_message: LastMessage {
                    id: last.id.clone(),
                    sender_id: last.sender_id.clone(),
                    content: last.visible_content().to_string(),
                    kind: last.kind.clone(),
                    created_at: last.created_at,
                    recalled: last.recalled,
                },
                unread_count,
            })
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.last_message
            .created_at
            .cmp(&a.last_message.created_at)
            .then_with(|| b.last_message.id.cmp(&a.last_message.id))
    });

    summaries
}

/// Unread rule: addressed to the viewer and not marked read, or undirected
/// and authored by someone else. Undirected messages carry no per-user read
/// receipt, so self-authorship is the only exclusion.
fn is_unread_for(message: &Message, viewer_id: &str) -> bool {
    match &message.receiver_id {
        Some(receiver) => {
            receiver == viewer_id && !matches!(message.status, Some(DeliveryStatus::Read))
        }
        None => message.sender_id != viewer_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use missive_types::message::{MessageKind, RECALLED_CONTENT};

    fn base_time() -> DateTime<Utc> {
        "2026-03-01T10:00:00Z".parse().unwrap()
    }

    fn message(
        id: &str,
        conversation_id: &str,
        sender_id: &str,
        receiver_id: Option<&str>,
        offset_secs: i64,
    ) -> Message {
        Message {
            id: id.to_string(),
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.map(str::to_string),
            content: format!("content of {id}"),
            kind: MessageKind::Text,
            attachment_url: None,
            status: None,
            created_at: base_time() + Duration::seconds(offset_secs),
            recalled: false,
            recalled_at: None,
        }
    }

    #[test]
    fn test_groups_into_one_summary_per_conversation() {
        let messages = vec![
            message("m1", "alice-bob-chat", "alice", Some("bob"), 0),
            message("m2", "alice-bob-chat", "bob", Some("alice"), 1),
            message("m3", "alice-carol-chat", "carol", Some("alice"), 2),
            message("m4", "alice-dave-chat", "dave", Some("alice"), 3),
        ];
        let summaries = summarize("alice", &messages);
        assert_eq!(summaries.len(), 3);
    }

    #[test]
    fn test_last_message_is_max_created_at() {
        let messages = vec![
            message("m1", "alice-bob-chat", "alice", Some("bob"), 0),
            message("m3", "alice-bob-chat", "alice", Some("bob"), 20),
            message("m2", "alice-bob-chat", "bob", Some("alice"), 10),
        ];
        let summaries = summarize("alice", &messages);
        assert_eq!(summaries[0].last_message.id, "m3");
    }

    #[test]
    fn test_last_message_tie_breaks_on_greater_id() {
        // Same timestamp: the lexicographically greater id wins.
        let messages = vec![
            message("m1", "alice-bob-chat", "alice", Some("bob"), 5),
            message("m9", "alice-bob-chat", "bob", Some("alice"), 5),
            message("m5", "alice-bob-chat", "alice", Some("bob"), 5),
        ];
        let summaries = summarize("alice", &messages);
        assert_eq!(summaries[0].last_message.id, "m9");
    }

    #[test]
    fn test_unread_count_directed_messages() {
        // Bob receives 3 from Alice (no status updates) and authored one.
        let mut incoming_read = message("m2", "alice-bob-chat", "alice", Some("bob"), 1);
        incoming_read.status = Some(DeliveryStatus::Read);

        let messages = vec![
            message("m1", "alice-bob-chat", "alice", Some("bob"), 0),
            message("m3", "alice-bob-chat", "alice", Some("bob"), 2),
            message("m4", "alice-bob-chat", "alice", Some("bob"), 3),
            message("m5", "alice-bob-chat", "bob", Some("alice"), 4),
        ];
        let summaries = summarize("bob", &messages);
        assert_eq!(summaries.len(), 1);
        // Bob's own message is excluded; the three from Alice count.
        assert_eq!(summaries[0].unread_count, 3);

        // A message already marked read does not add to the count.
        let mut with_read = messages;
        with_read.push(incoming_read);
        let summaries = summarize("bob", &with_read);
        assert_eq!(summaries[0].unread_count, 3);
    }

    #[test]
    fn test_unread_count_delivered_is_still_unread() {
        let mut delivered = message("m1", "alice-bob-chat", "alice", Some("bob"), 0);
        delivered.status = Some(DeliveryStatus::Delivered);
        let summaries = summarize("bob", &[delivered]);
        assert_eq!(summaries[0].unread_count, 1);
    }

    #[test]
    fn test_unread_count_ignores_messages_addressed_elsewhere() {
        // Viewer sent this one; the receiver is the other side.
        let messages = vec![message("m1", "alice-bob-chat", "alice", Some("bob"), 0)];
        let summaries = summarize("alice", &messages);
        assert_eq!(summaries[0].unread_count, 0);
    }

    #[test]
    fn test_unread_count_undirected_presumed_unread_unless_own() {
        let messages = vec![
            message("m1", "team-room", "alice", None, 0),
            message("m2", "team-room", "bob", None, 1),
            message("m3", "team-room", "carol", None, 2),
        ];
        let summaries = summarize("bob", &messages);
        assert_eq!(summaries[0].unread_count, 2);
    }

    #[test]
    fn test_participants_viewer_first() {
        let messages = vec![message("m1", "alice-bob-chat", "alice", Some("bob"), 0)];
        let summaries = summarize("bob", &messages);
        assert_eq!(summaries[0].participants, vec!["bob", "alice"]);
    }

    #[test]
    fn test_participants_single_entry_for_unparseable_id() {
        let messages = vec![message("m1", "room42", "alice", None, 0)];
        let summaries = summarize("bob", &messages);
        assert_eq!(summaries[0].participants, vec!["bob"]);
    }

    #[test]
    fn test_recalled_last_message_shows_placeholder() {
        let mut recalled = message("m2", "alice-bob-chat", "alice", Some("bob"), 1);
        recalled.recalled = true;
        recalled.recalled_at = Some(recalled.created_at);

        let messages = vec![
            message("m1", "alice-bob-chat", "alice", Some("bob"), 0),
            recalled,
        ];
        let summaries = summarize("bob", &messages);
        assert_eq!(summaries[0].last_message.content, RECALLED_CONTENT);
        assert!(summaries[0].last_message.recalled);
    }

    #[test]
    fn test_summaries_sorted_by_last_message_desc() {
        let messages = vec![
            message("m1", "alice-bob-chat", "bob", Some("alice"), 0),
            message("m2", "alice-carol-chat", "carol", Some("alice"), 50),
            message("m3", "alice-dave-chat", "dave", Some("alice"), 25),
        ];
        let summaries = summarize("alice", &messages);
        let order: Vec<&str> = summaries
            .iter()
            .map(|s| s.conversation_id.as_str())
            .collect();
        assert_eq!(
            order,
            vec!["alice-carol-chat", "alice-dave-chat", "alice-bob-chat"]
        );
    }

    #[test]
    fn test_empty_snapshot_yields_no_summaries() {
        assert!(summarize("alice", &[]).is_empty());
    }
}
