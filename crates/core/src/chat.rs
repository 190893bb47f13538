//! Chat transcript types and conversational-interview heuristics.
//!
//! A discussion answer is collected as a short interview: the respondent
//! writes, the assistant asks a follow-up, and so on. The transcript is
//! stored verbatim on the response row (JSONB) and later summarized.

use serde::{Deserialize, Serialize};

/// Message author role inside a transcript.
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";
pub const ROLE_SYSTEM: &str = "system";

/// Phrases that signal the respondent has nothing more to add.
const COMPLETION_KEYWORDS: &[&str] = &["done", "nothing"];

/// One turn of an interview transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_ASSISTANT.to_string(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_SYSTEM.to_string(),
            content: content.into(),
        }
    }
}

/// Does this respondent message end the interview?
///
/// Plain keyword detection; the model is only consulted for follow-up
/// wording, never for the stop decision.
pub fn is_final_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    COMPLETION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Fallback follow-up question when the completion API is unavailable.
///
/// Short answers get nudged toward a concrete example; longer ones get a
/// closing prompt.
pub fn fallback_follow_up(message: &str) -> &'static str {
    if message.trim().len() < 50 {
        "Can you share a specific example?"
    } else {
        "Is there anything else you'd like to add?"
    }
}

/// Fallback summary when the completion API is unavailable: the
/// respondent's own words, joined in order. Assistant turns are dropped.
pub fn fallback_summary(history: &[ChatMessage]) -> String {
    history
        .iter()
        .filter(|m| m.role == ROLE_USER)
        .map(|m| m.content.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_phrases_detected() {
        for phrase in ["done", "nothing else", "I have nothing more to add", "DONE"] {
            assert!(is_final_message(phrase), "{phrase:?} should be final");
        }
    }

    #[test]
    fn test_ordinary_message_not_final() {
        assert!(!is_final_message("They are very collaborative"));
    }

    #[test]
    fn test_fallback_follow_up_by_length() {
        assert_eq!(
            fallback_follow_up("Good leader"),
            "Can you share a specific example?"
        );
        assert_eq!(
            fallback_follow_up(
                "They provide clear direction, support team development, and always make time for questions"
            ),
            "Is there anything else you'd like to add?"
        );
    }

    #[test]
    fn test_fallback_summary_concatenates_user_turns() {
        let history = vec![
            ChatMessage::user("They are very helpful"),
            ChatMessage::assistant("How so?"),
            ChatMessage::user("Always available for questions"),
        ];
        let summary = fallback_summary(&history);
        assert!(summary.contains("They are very helpful"));
        assert!(summary.contains("Always available for questions"));
        assert!(!summary.contains("How so?"));
    }

    #[test]
    fn test_transcript_round_trips_through_json() {
        let history = vec![
            ChatMessage::user("Great at team management"),
            ChatMessage::assistant("Can you elaborate?"),
        ];
        let json = serde_json::to_value(&history).unwrap();
        let back: Vec<ChatMessage> = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }
}
