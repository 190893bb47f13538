//! Repository for the `feedback_templates` and `questions` tables.

use candidly_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::{FeedbackTemplate, Question, TemplateSummary};

/// Column list for feedback_templates queries.
const TEMPLATE_COLUMNS: &str = "id, name, description, intro_text, is_supervisor_feedback, \
    created_by_id, created_at";

/// Column list for questions queries.
const QUESTION_COLUMNS: &str = "id, template_id, question_text, question_type, order_index";

/// Provides CRUD operations for templates and their questions.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a template and its ordered questions in one transaction.
    ///
    /// `questions` are `(text, type)` pairs already validated and
    /// filtered of blanks; `order_index` is assigned from their order.
    pub async fn create(
        pool: &PgPool,
        created_by_id: DbId,
        name: &str,
        description: Option<&str>,
        intro_text: Option<&str>,
        is_supervisor_feedback: bool,
        questions: &[(String, String)],
    ) -> Result<FeedbackTemplate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_template = format!(
            "INSERT INTO feedback_templates
                (name, description, intro_text, is_supervisor_feedback, created_by_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TEMPLATE_COLUMNS}"
        );
        let template = sqlx::query_as::<_, FeedbackTemplate>(&insert_template)
            .bind(name)
            .bind(description)
            .bind(intro_text)
            .bind(is_supervisor_feedback)
            .bind(created_by_id)
            .fetch_one(&mut *tx)
            .await?;

        for (index, (text, question_type)) in questions.iter().enumerate() {
            sqlx::query(
                "INSERT INTO questions (template_id, question_text, question_type, order_index)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(template.id)
            .bind(text)
            .bind(question_type)
            .bind(index as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(template)
    }

    /// Find a template by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FeedbackTemplate>, sqlx::Error> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM feedback_templates WHERE id = $1");
        sqlx::query_as::<_, FeedbackTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all templates with question counts, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<TemplateSummary>, sqlx::Error> {
        sqlx::query_as::<_, TemplateSummary>(
            "SELECT t.id, t.name, t.description, t.intro_text, t.is_supervisor_feedback,
                    t.created_at, COUNT(q.id) AS question_count
             FROM feedback_templates t
             LEFT JOIN questions q ON q.template_id = t.id
             GROUP BY t.id
             ORDER BY t.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// List a template's questions in presentation order.
    pub async fn list_questions(
        pool: &PgPool,
        template_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions
             WHERE template_id = $1
             ORDER BY order_index ASC"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(template_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single question by its ID.
    pub async fn find_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(question_id)
            .fetch_optional(pool)
            .await
    }
}
