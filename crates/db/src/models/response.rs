//! Response entity model and DTOs.
//!
//! One row per question per request. While `is_draft` is true the row set
//! is replaced wholesale on every save; submission freezes the rows.

use candidly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `responses` table.
///
/// Exactly one of the answer columns is populated, matching the
/// question's type. `chat_history` carries the raw interview transcript
/// for discussion answers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Response {
    pub id: DbId,
    pub feedback_request_id: DbId,
    pub question_id: DbId,
    pub rating_value: Option<i32>,
    pub agreement_value: Option<String>,
    pub discussion_summary: Option<String>,
    pub chat_history: Option<serde_json::Value>,
    pub is_draft: bool,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Values for one freshly built response row.
///
/// Handlers construct these from the draft payload (summarizing
/// discussion transcripts first); the repository inserts them as a batch.
#[derive(Debug, Clone)]
pub struct NewResponse {
    pub question_id: DbId,
    pub rating_value: Option<i32>,
    pub agreement_value: Option<String>,
    pub discussion_summary: Option<String>,
    pub chat_history: Option<serde_json::Value>,
}

/// One typed answer in the draft-save payload, keyed by question id.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftAnswer {
    /// 1-5, or null for N/A.
    Rating { value: Option<i32> },
    /// One of the five agreement values.
    Agreement { value: String },
    /// The raw interview transcript; the server derives the summary.
    Discussion {
        chat_history: Vec<candidly_core::chat::ChatMessage>,
    },
}

/// Report line: a submitted response joined with its question.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportLine {
    pub question_id: DbId,
    pub question_text: String,
    pub question_type: String,
    pub order_index: i32,
    pub rating_value: Option<i32>,
    pub agreement_value: Option<String>,
    pub discussion_summary: Option<String>,
    pub submitted_at: Option<Timestamp>,
}
