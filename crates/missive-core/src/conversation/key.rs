//! Conversation id derivation and parsing.
//!
//! A 1:1 conversation id is the two participant tokens joined by `-` with a
//! literal `chat` suffix, e.g. `bella-tommy-chat`. Derivation is commutative
//! so both sides compute the same id.

/// Delimiter between the encoded tokens of a conversation id.
pub const DELIMITER: &str = "-";

/// Literal scope suffix terminating a 1:1 conversation id.
pub const SCOPE_SUFFIX: &str = "chat";

/// Derives the conversation id for a 1:1 conversation.
///
/// Deterministic and commutative: `derive_id(a, b) == derive_id(b, a)`.
/// The lexicographically smaller participant token comes first.
pub fn derive_id(user_a: &str, user_b: &str) -> String {
    let (first, second) = if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    };
    format!("{first}{DELIMITER}{second}{DELIMITER}{SCOPE_SUFFIX}")
}

/// Extracts the participant identities encoded in a conversation id, the
/// viewer listed first.
///
/// Splits on the delimiter and treats the first two tokens as the
/// candidates, discarding the scope suffix. When fewer than two tokens are
/// present the counterpart is unknown and only the viewer is returned, so
/// callers must handle a single-entry result.
pub fn parse_participants(conversation_id: &str, viewer_id: &str) -> Vec<String> {
    let mut tokens = conversation_id.split(DELIMITER);
    let (Some(first), Some(second)) = (tokens.next(), tokens.next()) else {
        return vec![viewer_id.to_string()];
    };

    let other = if first == viewer_id { second } else { first };
    vec![viewer_id.to_string(), other.to_string()]
}
