//! Prompt construction for the hosted completion API.
//!
//! Every AI feature assembles its prompt here as a pure string function,
//! so the exact wording is unit-testable without network access. The
//! supervisor guidance block is only injected for templates flagged as
//! supervisor feedback.

/// Extra system guidance when the feedback target is the respondent's
/// supervisor.
const SUPERVISOR_GUIDANCE: &str = "This is supervisor feedback: the person being discussed is \
the respondent's supervisor. Pay particular attention to leadership behaviors, management \
style, delegation, and how safe the respondent feels raising concerns. Probe gently; \
upward feedback is sensitive.";

/// System prompt for one conversational interview turn.
///
/// The model plays a feedback interviewer: it asks one short follow-up
/// question at a time and never invents feedback content itself.
pub fn follow_up_system_prompt(
    question_text: &str,
    target_name: &str,
    context: Option<&str>,
    is_supervisor_feedback: bool,
) -> String {
    let mut prompt = format!(
        "You are a thoughtful feedback interviewer helping a colleague give useful feedback \
about {target_name}. The current question is: \"{question_text}\". Read the conversation so \
far and reply with exactly one short follow-up question that draws out a concrete example or \
impact. Do not answer the question yourself, do not summarize, and do not ask more than one \
thing at a time."
    );

    if let Some(context) = context {
        if !context.trim().is_empty() {
            prompt.push_str(&format!(
                "\n\nRelationship context provided by the requester: {context}"
            ));
        }
    }

    if is_supervisor_feedback {
        prompt.push_str("\n\n");
        prompt.push_str(SUPERVISOR_GUIDANCE);
    }

    prompt
}

/// System prompt for summarizing a finished discussion transcript.
pub fn summary_system_prompt(question_text: &str, is_supervisor_feedback: bool) -> String {
    let mut prompt = format!(
        "You summarize feedback interviews. The respondent answered the question: \
\"{question_text}\". Write a concise third-person summary (2-4 sentences) of what the \
respondent said. Preserve concrete examples and impacts, keep their sentiment intact, and \
add nothing they did not say."
    );

    if is_supervisor_feedback {
        prompt.push_str("\n\n");
        prompt.push_str(SUPERVISOR_GUIDANCE);
    }

    prompt
}

/// User prompt for the tone / safety analysis of draft summaries.
///
/// The model is asked for strict JSON so the caller can attempt a parse;
/// the caller falls back to a conservative default when parsing fails.
pub fn tone_analysis_prompt(summaries: &[String]) -> String {
    let joined = summaries.join("\n- ");
    format!(
        "Review the following draft feedback statements for tone before they are shared.\n\
- {joined}\n\n\
Respond with strict JSON only, no prose, in the shape:\n\
{{\"overall_tone\": \"supportive|neutral|harsh\", \"concerns\": [\"...\"]}}\n\
List a concern for any statement that is personal rather than behavioral, absolute \
(\"always\", \"never\"), or likely to put the reader on the defensive."
    )
}

/// User prompt for the delivery coaching guide.
pub fn coaching_guide_prompt(
    target_name: &str,
    context: Option<&str>,
    summaries: &[String],
) -> String {
    let answers = summaries.join("\n- ");
    let context_line = match context {
        Some(c) if !c.trim().is_empty() => format!("Relationship context: {c}\n"),
        _ => String::new(),
    };
    format!(
        "You are coaching someone on delivering feedback to {target_name} in person.\n\
{context_line}The submitted feedback, per question:\n- {answers}\n\n\
Write a short delivery guide with: an opening that sets a constructive tone, the two or \
three themes worth leading with, phrasing suggestions for the hardest message, and one \
question to invite dialogue. Keep it under 300 words."
    )
}

/// User prompt for extracting question lines from a screenshot.
pub fn extraction_prompt() -> &'static str {
    "This image is a screenshot of a feedback form or question list. Transcribe each distinct \
question as one line of plain text, in the order shown. Output only the question lines, one \
per line, with no numbering and no commentary."
}

/// Fallback coaching guide used when the completion API is unavailable.
pub fn fallback_coaching_guide(target_name: &str) -> String {
    format!(
        "Start the conversation with {target_name} by stating your positive intent, then walk \
through the feedback one theme at a time. Describe specific behaviors and their impact \
rather than judgments about the person, leave room for their perspective after each theme, \
and agree on one concrete next step together."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supervisor_follow_up_includes_guidance() {
        let prompt = follow_up_system_prompt("How is their leadership?", "Manager", None, true);
        let lower = prompt.to_lowercase();
        assert!(lower.contains("supervisor"));
        assert!(lower.contains("management"));
        assert!(lower.contains("leadership"));
    }

    #[test]
    fn test_regular_follow_up_omits_supervisor_guidance() {
        let prompt =
            follow_up_system_prompt("How is their teamwork?", "Alice Johnson", None, false);
        let lower = prompt.to_lowercase();
        assert!(!lower.contains("supervisor"));
        assert!(!lower.contains("manager"));
    }

    #[test]
    fn test_follow_up_carries_question_and_context() {
        let prompt = follow_up_system_prompt(
            "How is their communication?",
            "Bob Wilson",
            Some("We worked together on the platform migration"),
            false,
        );
        assert!(prompt.contains("How is their communication?"));
        assert!(prompt.contains("Bob Wilson"));
        assert!(prompt.contains("platform migration"));
    }

    #[test]
    fn test_supervisor_summary_includes_guidance() {
        let prompt = summary_system_prompt("How would you describe their leadership style?", true);
        let lower = prompt.to_lowercase();
        assert!(lower.contains("supervisor"));
        assert!(lower.contains("leadership"));
        assert!(lower.contains("management"));
    }

    #[test]
    fn test_regular_summary_omits_supervisor_guidance() {
        let prompt = summary_system_prompt("How would you describe their teamwork?", false);
        let lower = prompt.to_lowercase();
        assert!(!lower.contains("supervisor"));
        assert!(!lower.contains("manager"));
    }

    #[test]
    fn test_tone_prompt_requests_strict_json() {
        let prompt = tone_analysis_prompt(&["They never listen".to_string()]);
        assert!(prompt.contains("strict JSON"));
        assert!(prompt.contains("overall_tone"));
        assert!(prompt.contains("They never listen"));
    }

    #[test]
    fn test_coaching_prompt_carries_answers_and_context() {
        let prompt = coaching_guide_prompt(
            "Alice Johnson",
            Some("Peer on the same team"),
            &["Strong collaborator".to_string(), "Could delegate more".to_string()],
        );
        assert!(prompt.contains("Alice Johnson"));
        assert!(prompt.contains("Peer on the same team"));
        assert!(prompt.contains("Could delegate more"));
    }
}
