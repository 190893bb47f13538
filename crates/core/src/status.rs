//! Feedback request status vocabulary.

use crate::error::CoreError;

/// Created, no answers saved yet.
pub const STATUS_PENDING: &str = "pending";

/// The assignee has saved at least one draft.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Responses submitted and frozen.
pub const STATUS_COMPLETED: &str = "completed";

/// All valid request status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_accepted() {
        for s in VALID_STATUSES {
            validate_status(s).unwrap();
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(validate_status("archived").is_err());
    }
}
