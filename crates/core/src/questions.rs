//! Question type and answer vocabularies with validation helpers.
//!
//! Question types and agreement values are stored as plain strings in the
//! database; these constants are the single source of truth for both the
//! DB and API layers.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Numeric 1-5 scale answer.
pub const QUESTION_TYPE_RATING: &str = "rating";

/// Five-point agree/disagree answer.
pub const QUESTION_TYPE_AGREEMENT: &str = "agreement";

/// Free-text conversational answer, summarized before reporting.
pub const QUESTION_TYPE_DISCUSSION: &str = "discussion";

/// All valid question type values.
pub const VALID_QUESTION_TYPES: &[&str] = &[
    QUESTION_TYPE_RATING,
    QUESTION_TYPE_AGREEMENT,
    QUESTION_TYPE_DISCUSSION,
];

/// All valid agreement answer values, from most negative to most positive.
pub const VALID_AGREEMENT_VALUES: &[&str] = &[
    "strongly_disagree",
    "disagree",
    "neutral",
    "agree",
    "strongly_agree",
];

/// Inclusive rating scale bounds.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Maximum length for a single question's text.
pub const MAX_QUESTION_LENGTH: usize = 2_000;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a question type string is one of the accepted values.
pub fn validate_question_type(question_type: &str) -> Result<(), CoreError> {
    if VALID_QUESTION_TYPES.contains(&question_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid question type '{question_type}'. Must be one of: {}",
            VALID_QUESTION_TYPES.join(", ")
        )))
    }
}

/// Validate a question's text: non-blank and within the length cap.
pub fn validate_question_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Question text must not be blank".to_string(),
        ));
    }
    if text.len() > MAX_QUESTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Question text exceeds maximum length of {MAX_QUESTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a rating answer. `None` means N/A and is always accepted.
pub fn validate_rating(value: Option<i32>) -> Result<(), CoreError> {
    match value {
        None => Ok(()),
        Some(v) if (MIN_RATING..=MAX_RATING).contains(&v) => Ok(()),
        Some(v) => Err(CoreError::Validation(format!(
            "Invalid rating {v}. Must be between {MIN_RATING} and {MAX_RATING}"
        ))),
    }
}

/// Validate an agreement answer value.
pub fn validate_agreement(value: &str) -> Result<(), CoreError> {
    if VALID_AGREEMENT_VALUES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid agreement value '{value}'. Must be one of: {}",
            VALID_AGREEMENT_VALUES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_question_types_accepted() {
        for qt in VALID_QUESTION_TYPES {
            validate_question_type(qt).unwrap();
        }
    }

    #[test]
    fn test_unknown_question_type_rejected() {
        let err = validate_question_type("freeform").unwrap_err();
        assert!(err.to_string().contains("freeform"));
    }

    #[test]
    fn test_blank_question_text_rejected() {
        assert!(validate_question_text("   ").is_err());
        assert!(validate_question_text("How is their communication?").is_ok());
    }

    #[test]
    fn test_rating_bounds() {
        for v in MIN_RATING..=MAX_RATING {
            validate_rating(Some(v)).unwrap();
        }
        // None is the N/A answer.
        validate_rating(None).unwrap();
        assert!(validate_rating(Some(0)).is_err());
        assert!(validate_rating(Some(6)).is_err());
    }

    #[test]
    fn test_agreement_values() {
        validate_agreement("strongly_agree").unwrap();
        validate_agreement("neutral").unwrap();
        assert!(validate_agreement("maybe").is_err());
    }
}
