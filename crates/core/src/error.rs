//! Domain-level error type shared by the db and api crates.

use crate::types::DbId;

/// Domain errors raised by core validation and lookup logic.
///
/// The API layer maps each variant to an HTTP status in its own
/// `AppError` type; this enum stays transport-agnostic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by primary key found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity type name, e.g. `"FeedbackRequest"`.
        entity: &'static str,
        /// The primary key that missed.
        id: DbId,
    },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
