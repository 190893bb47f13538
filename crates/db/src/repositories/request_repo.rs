//! Repository for the `feedback_requests` table.

use candidly_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::request::{CreateFeedbackRequest, FeedbackRequest, RequestSummary};

/// Column list for feedback_requests queries.
const REQUEST_COLUMNS: &str = "id, target_name, target_email, template_id, created_by_id, \
    assigned_to_email, reviewer_id, context, status, completed_at, created_at";

/// Provides CRUD operations for feedback requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Create a feedback request, returning the created row.
    ///
    /// Emails are lowercased on the way in so the email-first access
    /// checks are case-insensitive.
    pub async fn create(
        pool: &PgPool,
        created_by_id: DbId,
        input: &CreateFeedbackRequest,
    ) -> Result<FeedbackRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback_requests
                (target_name, target_email, template_id, created_by_id,
                 assigned_to_email, reviewer_id, context)
             VALUES ($1, lower($2), $3, $4, lower($5), $6, $7)
             RETURNING {REQUEST_COLUMNS}"
        );
        sqlx::query_as::<_, FeedbackRequest>(&query)
            .bind(&input.target_name)
            .bind(&input.target_email)
            .bind(input.template_id)
            .bind(created_by_id)
            .bind(&input.assigned_to_email)
            .bind(input.reviewer_id)
            .bind(&input.context)
            .fetch_one(pool)
            .await
    }

    /// Find a feedback request by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FeedbackRequest>, sqlx::Error> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM feedback_requests WHERE id = $1");
        sqlx::query_as::<_, FeedbackRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Dashboard listing: every request the user is a party to, newest
    /// first. Admins list everything.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: DbId,
        email: &str,
        is_admin: bool,
    ) -> Result<Vec<RequestSummary>, sqlx::Error> {
        let base = "SELECT r.id, r.target_name, r.target_email, r.assigned_to_email,
                    r.status, r.created_at, r.completed_at,
                    t.name AS template_name, t.is_supervisor_feedback
             FROM feedback_requests r
             INNER JOIN feedback_templates t ON t.id = r.template_id";

        if is_admin {
            let query = format!("{base} ORDER BY r.created_at DESC");
            sqlx::query_as::<_, RequestSummary>(&query).fetch_all(pool).await
        } else {
            let query = format!(
                "{base}
                 WHERE r.created_by_id = $1
                    OR r.target_email = lower($2)
                    OR r.assigned_to_email = lower($2)
                 ORDER BY r.created_at DESC"
            );
            sqlx::query_as::<_, RequestSummary>(&query)
                .bind(user_id)
                .bind(email)
                .fetch_all(pool)
                .await
        }
    }

    /// Move a request to a new status.
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE feedback_requests SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark a request completed, stamping `completed_at`.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        status: &str,
        completed_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE feedback_requests SET status = $1, completed_at = $2 WHERE id = $3")
            .bind(status)
            .bind(completed_at)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
