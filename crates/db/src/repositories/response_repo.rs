//! Repository for the `responses` table.
//!
//! Draft rows are replaced wholesale on every save (delete-then-insert in
//! one transaction); submission freezes them in place.

use candidly_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::response::{NewResponse, ReportLine, Response};

/// Column list for responses queries.
const RESPONSE_COLUMNS: &str = "id, feedback_request_id, question_id, rating_value, \
    agreement_value, discussion_summary, chat_history, is_draft, submitted_at, created_at";

/// Provides draft and submission operations for responses.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Replace the full draft set for a request with fresh rows.
    ///
    /// Deletes every existing draft row for the request, then inserts one
    /// row per answer, all inside one transaction. Submitted rows are
    /// never touched.
    pub async fn replace_drafts(
        pool: &PgPool,
        feedback_request_id: DbId,
        answers: &[NewResponse],
    ) -> Result<Vec<Response>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM responses WHERE feedback_request_id = $1 AND is_draft = true")
            .bind(feedback_request_id)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO responses
                (feedback_request_id, question_id, rating_value, agreement_value,
                 discussion_summary, chat_history)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {RESPONSE_COLUMNS}"
        );

        let mut rows = Vec::with_capacity(answers.len());
        for answer in answers {
            let row = sqlx::query_as::<_, Response>(&insert)
                .bind(feedback_request_id)
                .bind(answer.question_id)
                .bind(answer.rating_value)
                .bind(&answer.agreement_value)
                .bind(&answer.discussion_summary)
                .bind(&answer.chat_history)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    /// List the current draft rows for a request.
    pub async fn list_drafts(
        pool: &PgPool,
        feedback_request_id: DbId,
    ) -> Result<Vec<Response>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM responses
             WHERE feedback_request_id = $1 AND is_draft = true
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Response>(&query)
            .bind(feedback_request_id)
            .fetch_all(pool)
            .await
    }

    /// Find the draft row for one question of a request.
    pub async fn find_draft_for_question(
        pool: &PgPool,
        feedback_request_id: DbId,
        question_id: DbId,
    ) -> Result<Option<Response>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM responses
             WHERE feedback_request_id = $1 AND question_id = $2 AND is_draft = true"
        );
        sqlx::query_as::<_, Response>(&query)
            .bind(feedback_request_id)
            .bind(question_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a draft discussion row's summary.
    pub async fn update_draft_summary(
        pool: &PgPool,
        id: DbId,
        discussion_summary: &str,
    ) -> Result<Response, sqlx::Error> {
        let query = format!(
            "UPDATE responses SET discussion_summary = $1
             WHERE id = $2 AND is_draft = true
             RETURNING {RESPONSE_COLUMNS}"
        );
        sqlx::query_as::<_, Response>(&query)
            .bind(discussion_summary)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Freeze all draft rows for a request: clear `is_draft` and stamp
    /// `submitted_at`. Returns the number of rows frozen.
    pub async fn submit_drafts(
        pool: &PgPool,
        feedback_request_id: DbId,
        submitted_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE responses SET is_draft = false, submitted_at = $1
             WHERE feedback_request_id = $2 AND is_draft = true",
        )
        .bind(submitted_at)
        .bind(feedback_request_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Report query: submitted responses joined with their questions, in
    /// question order. Draft rows never appear here.
    pub async fn report(
        pool: &PgPool,
        feedback_request_id: DbId,
    ) -> Result<Vec<ReportLine>, sqlx::Error> {
        sqlx::query_as::<_, ReportLine>(
            "SELECT r.question_id, q.question_text, q.question_type, q.order_index,
                    r.rating_value, r.agreement_value, r.discussion_summary, r.submitted_at
             FROM responses r
             INNER JOIN questions q ON q.id = r.question_id
             WHERE r.feedback_request_id = $1 AND r.is_draft = false
             ORDER BY q.order_index ASC",
        )
        .bind(feedback_request_id)
        .fetch_all(pool)
        .await
    }
}
