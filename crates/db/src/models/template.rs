//! Feedback template and question entity models and DTOs.

use candidly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `feedback_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedbackTemplate {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub intro_text: Option<String>,
    pub is_supervisor_feedback: bool,
    pub created_by_id: DbId,
    pub created_at: Timestamp,
}

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub template_id: DbId,
    pub question_text: String,
    pub question_type: String,
    pub order_index: i32,
}

/// One question in a template-creation payload.
#[derive(Debug, Deserialize)]
pub struct CreateQuestion {
    pub question_text: String,
    pub question_type: String,
}

/// DTO for creating a template with its ordered questions.
#[derive(Debug, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub description: Option<String>,
    pub intro_text: Option<String>,
    #[serde(default)]
    pub is_supervisor_feedback: bool,
    pub questions: Vec<CreateQuestion>,
}

/// Template list row with its question count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub intro_text: Option<String>,
    pub is_supervisor_feedback: bool,
    pub created_at: Timestamp,
    pub question_count: i64,
}
