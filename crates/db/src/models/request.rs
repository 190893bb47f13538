//! Feedback request entity model and DTOs.

use candidly_core::access::RequestParties;
use candidly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `feedback_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedbackRequest {
    pub id: DbId,
    pub target_name: String,
    pub target_email: Option<String>,
    pub template_id: DbId,
    pub created_by_id: DbId,
    pub assigned_to_email: String,
    pub reviewer_id: Option<DbId>,
    pub context: Option<String>,
    pub status: String,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl FeedbackRequest {
    /// The parties relevant to access-control decisions.
    pub fn parties(&self) -> RequestParties {
        RequestParties {
            created_by_id: self.created_by_id,
            target_email: self.target_email.clone(),
            assigned_to_email: self.assigned_to_email.clone(),
        }
    }
}

/// DTO for creating a feedback request.
#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub target_name: String,
    pub target_email: Option<String>,
    pub template_id: DbId,
    pub assigned_to_email: String,
    pub reviewer_id: Option<DbId>,
    pub context: Option<String>,
}

/// Dashboard list row: a request joined with its template's name and
/// supervisor flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestSummary {
    pub id: DbId,
    pub target_name: String,
    pub target_email: Option<String>,
    pub assigned_to_email: String,
    pub status: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub template_name: String,
    pub is_supervisor_feedback: bool,
}
