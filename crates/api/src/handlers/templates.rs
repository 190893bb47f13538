//! Handlers for feedback templates and their questions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use base64::Engine as _;
use candidly_core::access::ensure_can_create_templates;
use candidly_core::error::CoreError;
use candidly_core::types::DbId;
use candidly_core::{prompts, questions, screenshot};
use candidly_db::models::template::{CreateTemplate, FeedbackTemplate, Question};
use candidly_db::repositories::TemplateRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::ensure_user_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Template plus its ordered questions.
#[derive(Debug, Serialize)]
pub struct TemplateDetail {
    #[serde(flatten)]
    pub template: FeedbackTemplate,
    pub questions: Vec<Question>,
}

/// GET /templates
///
/// List all templates with question counts, newest first.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let templates = TemplateRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /templates
///
/// Create a template with its ordered questions. Requires the
/// template-creation flag. Blank question texts are skipped; the rest
/// keep their submitted order.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<impl IntoResponse> {
    let user = ensure_user_exists(&state.pool, auth.user_id).await?;
    ensure_can_create_templates(user.permission_flags()).map_err(AppError::Core)?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Template name must not be blank".into(),
        )));
    }

    let mut question_rows: Vec<(String, String)> = Vec::with_capacity(input.questions.len());
    for question in &input.questions {
        let text = question.question_text.trim();
        if text.is_empty() {
            continue;
        }
        questions::validate_question_text(text).map_err(AppError::Core)?;
        questions::validate_question_type(&question.question_type).map_err(AppError::Core)?;
        question_rows.push((text.to_string(), question.question_type.clone()));
    }

    let template = TemplateRepo::create(
        &state.pool,
        auth.user_id,
        input.name.trim(),
        input.description.as_deref(),
        input.intro_text.as_deref(),
        input.is_supervisor_feedback,
        &question_rows,
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        template_id = template.id,
        question_count = question_rows.len(),
        "Template created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// GET /templates/{id}
///
/// Template detail with its ordered questions.
pub async fn get(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = find_template(&state.pool, template_id).await?;
    let questions = TemplateRepo::list_questions(&state.pool, template_id).await?;
    Ok(Json(DataResponse {
        data: TemplateDetail {
            template,
            questions,
        },
    }))
}

/// Request body for `POST /templates/extract-questions`.
#[derive(Debug, Deserialize)]
pub struct ExtractQuestionsInput {
    /// Base64-encoded screenshot bytes (PNG, JPEG, or WebP).
    pub image_base64: String,
}

/// Extracted question lines, in the order they appear in the image.
#[derive(Debug, Serialize)]
pub struct ExtractedQuestions {
    pub questions: Vec<String>,
}

/// POST /templates/extract-questions
///
/// Extract question lines from a screenshot via the vision endpoint, as
/// a drafting aid for template authors. Returns an empty list when the
/// completion API is unavailable.
pub async fn extract_questions(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ExtractQuestionsInput>,
) -> AppResult<impl IntoResponse> {
    let user = ensure_user_exists(&state.pool, auth.user_id).await?;
    ensure_can_create_templates(user.permission_flags()).map_err(AppError::Core)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&input.image_base64)
        .map_err(|_| {
            AppError::Core(CoreError::Validation(
                "Screenshot is not valid base64".into(),
            ))
        })?;
    let mime_type = screenshot::validate_screenshot(&bytes).map_err(AppError::Core)?;

    let extracted = match state
        .llm
        .complete_with_image(prompts::extraction_prompt(), mime_type, &input.image_base64)
        .await
    {
        Ok(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Question extraction failed, returning empty list");
            Vec::new()
        }
    };

    tracing::info!(
        user_id = auth.user_id,
        question_count = extracted.len(),
        "Screenshot question extraction"
    );

    Ok(Json(DataResponse {
        data: ExtractedQuestions {
            questions: extracted,
        },
    }))
}

/// Verify that a template exists, returning the row.
pub async fn find_template(
    pool: &sqlx::PgPool,
    template_id: DbId,
) -> AppResult<FeedbackTemplate> {
    TemplateRepo::find_by_id(pool, template_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "FeedbackTemplate",
                id: template_id,
            })
        })
}
