//! Handlers for draft answers, submission, and the report.
//!
//! Draft saves replace the whole draft set (delete-then-insert);
//! submission freezes the rows and completes the request.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use candidly_core::chat::{fallback_summary, ChatMessage};
use candidly_core::error::CoreError;
use candidly_core::types::DbId;
use candidly_core::{prompts, questions, status};
use candidly_db::models::request::FeedbackRequest;
use candidly_db::models::response::{DraftAnswer, NewResponse, ReportLine};
use candidly_db::repositories::{RequestRepo, ResponseRepo, TemplateRepo};
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::requests::{find_request_for_respondent, find_request_for_viewer};
use crate::handlers::templates::find_template;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Report payload: the request plus its submitted answers in question
/// order.
#[derive(Debug, Serialize)]
pub struct ReportPayload {
    pub request: FeedbackRequest,
    pub lines: Vec<ReportLine>,
}

/// PUT /requests/{id}/draft
///
/// Replace the draft answer set for a request. The body maps question
/// ids to typed answers; discussion transcripts are summarized via the
/// completion API (fallback: the respondent's own words concatenated).
pub async fn save_draft(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<BTreeMap<DbId, DraftAnswer>>,
) -> AppResult<impl IntoResponse> {
    let request = find_request_for_respondent(&state.pool, &auth, request_id).await?;
    ensure_not_completed(&request)?;

    let template = find_template(&state.pool, request.template_id).await?;
    let question_rows = TemplateRepo::list_questions(&state.pool, request.template_id).await?;

    let mut answers = Vec::with_capacity(input.len());
    for (question_id, answer) in &input {
        let question = question_rows
            .iter()
            .find(|q| q.id == *question_id)
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Question {question_id} does not belong to this feedback request"
                )))
            })?;

        let row = match answer {
            DraftAnswer::Rating { value } => {
                questions::validate_rating(*value).map_err(AppError::Core)?;
                NewResponse {
                    question_id: question.id,
                    rating_value: *value,
                    agreement_value: None,
                    discussion_summary: None,
                    chat_history: None,
                }
            }
            DraftAnswer::Agreement { value } => {
                questions::validate_agreement(value).map_err(AppError::Core)?;
                NewResponse {
                    question_id: question.id,
                    rating_value: None,
                    agreement_value: Some(value.clone()),
                    discussion_summary: None,
                    chat_history: None,
                }
            }
            DraftAnswer::Discussion { chat_history } => {
                let summary = summarize_discussion(
                    &state,
                    &question.question_text,
                    template.is_supervisor_feedback,
                    chat_history,
                )
                .await;
                NewResponse {
                    question_id: question.id,
                    rating_value: None,
                    agreement_value: None,
                    discussion_summary: Some(summary),
                    chat_history: Some(serde_json::to_value(chat_history).map_err(|e| {
                        AppError::InternalError(format!("Transcript serialization error: {e}"))
                    })?),
                }
            }
        };
        answers.push(row);
    }

    let rows = ResponseRepo::replace_drafts(&state.pool, request_id, &answers).await?;

    if request.status == status::STATUS_PENDING {
        RequestRepo::set_status(&state.pool, request_id, status::STATUS_IN_PROGRESS).await?;
    }

    tracing::info!(
        user_id = auth.user_id,
        request_id = request_id,
        answer_count = rows.len(),
        "Draft responses saved"
    );

    Ok(Json(DataResponse { data: rows }))
}

/// POST /requests/{id}/submit
///
/// Freeze all draft rows and complete the request. Responses are
/// immutable afterwards.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request_for_respondent(&state.pool, &auth, request_id).await?;
    ensure_not_completed(&request)?;

    let now = Utc::now();
    let frozen = ResponseRepo::submit_drafts(&state.pool, request_id, now).await?;
    RequestRepo::mark_completed(&state.pool, request_id, status::STATUS_COMPLETED, now).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = request_id,
        response_count = frozen,
        "Feedback submitted"
    );

    Ok(Json(serde_json::json!({ "success": true, "submitted": frozen })))
}

/// POST /requests/{id}/responses/{question_id}/regenerate-summary
///
/// Re-run summarization over the stored transcript of a draft
/// discussion answer.
pub async fn regenerate_summary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((request_id, question_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let request = find_request_for_respondent(&state.pool, &auth, request_id).await?;
    ensure_not_completed(&request)?;

    let template = find_template(&state.pool, request.template_id).await?;

    let draft = ResponseRepo::find_draft_for_question(&state.pool, request_id, question_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Response",
                id: question_id,
            })
        })?;

    let history_value = draft.chat_history.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Only discussion answers with a transcript can be re-summarized".into(),
        ))
    })?;
    let history: Vec<ChatMessage> = serde_json::from_value(history_value)
        .map_err(|e| AppError::InternalError(format!("Stored transcript unreadable: {e}")))?;

    let question = TemplateRepo::find_question(&state.pool, question_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Question",
                id: question_id,
            })
        })?;

    let summary = summarize_discussion(
        &state,
        &question.question_text,
        template.is_supervisor_feedback,
        &history,
    )
    .await;

    let updated = ResponseRepo::update_draft_summary(&state.pool, draft.id, &summary).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = request_id,
        question_id = question_id,
        "Discussion summary regenerated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// GET /requests/{id}/report
///
/// Submitted responses only, in question order. Draft rows never
/// appear here.
pub async fn report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request_for_viewer(&state.pool, &auth, request_id).await?;
    let lines = ResponseRepo::report(&state.pool, request_id).await?;
    Ok(Json(DataResponse {
        data: ReportPayload { request, lines },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Completed requests are frozen; any further write is a conflict.
fn ensure_not_completed(request: &FeedbackRequest) -> AppResult<()> {
    if request.status == status::STATUS_COMPLETED {
        return Err(AppError::Core(CoreError::Conflict(
            "This feedback request has already been submitted".into(),
        )));
    }
    Ok(())
}

/// Summarize a discussion transcript via the completion API, falling
/// back to the respondent's own words when the call fails.
pub async fn summarize_discussion(
    state: &AppState,
    question_text: &str,
    is_supervisor_feedback: bool,
    history: &[ChatMessage],
) -> String {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(prompts::summary_system_prompt(
        question_text,
        is_supervisor_feedback,
    )));
    messages.extend(history.iter().cloned());

    match state.llm.complete(&messages).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "Summarization failed, using transcript fallback");
            fallback_summary(history)
        }
    }
}
