//! Handlers for feedback requests: creation, dashboard, detail, survey.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use candidly_core::access::{can_respond, can_view_request, ensure_can_assign};
use candidly_core::error::CoreError;
use candidly_core::types::DbId;
use candidly_db::models::request::{CreateFeedbackRequest, FeedbackRequest};
use candidly_db::models::response::Response;
use candidly_db::models::template::Question;
use candidly_db::repositories::{RequestRepo, ResponseRepo, TemplateRepo};
use serde::Serialize;
use validator::ValidateEmail;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::ensure_user_exists;
use crate::handlers::templates::find_template;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Interview payload for the assignee: the template intro, the ordered
/// questions, and any draft answers already saved.
#[derive(Debug, Serialize)]
pub struct SurveyPayload {
    pub request: FeedbackRequest,
    pub intro_text: Option<String>,
    pub is_supervisor_feedback: bool,
    pub questions: Vec<Question>,
    pub drafts: Vec<Response>,
}

/// GET /requests
///
/// Dashboard listing: every request the caller is a party to (creator,
/// target, or assignee). Admins see everything.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests =
        RequestRepo::list_visible(&state.pool, auth.user_id, &auth.email, auth.is_admin).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// POST /requests
///
/// Create a feedback request against a template. Assigning to anyone
/// but yourself requires the dedicated permission flag.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    if input.target_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Target name must not be blank".into(),
        )));
    }
    if !input.assigned_to_email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid assignee email '{}'",
            input.assigned_to_email
        ))));
    }
    if let Some(ref target_email) = input.target_email {
        if !target_email.validate_email() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid target email '{target_email}'"
            ))));
        }
    }

    let user = ensure_user_exists(&state.pool, auth.user_id).await?;
    ensure_can_assign(user.permission_flags(), &user.email, &input.assigned_to_email)
        .map_err(AppError::Core)?;

    // The template must exist before hanging a request off it.
    find_template(&state.pool, input.template_id).await?;

    if let Some(reviewer_id) = input.reviewer_id {
        ensure_user_exists(&state.pool, reviewer_id).await?;
    }

    let request = RequestRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = request.id,
        template_id = request.template_id,
        assigned_to = %request.assigned_to_email,
        "Feedback request created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /requests/{id}
///
/// Request detail for any party to the request.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request_for_viewer(&state.pool, &auth, request_id).await?;
    Ok(Json(DataResponse { data: request }))
}

/// GET /requests/{id}/survey
///
/// The interview payload. Only the assignee may answer, so only the
/// assignee gets the survey.
pub async fn survey(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request_for_respondent(&state.pool, &auth, request_id).await?;

    let template = find_template(&state.pool, request.template_id).await?;
    let questions = TemplateRepo::list_questions(&state.pool, request.template_id).await?;
    let drafts = ResponseRepo::list_drafts(&state.pool, request_id).await?;

    Ok(Json(DataResponse {
        data: SurveyPayload {
            request,
            intro_text: template.intro_text,
            is_supervisor_feedback: template.is_supervisor_feedback,
            questions,
            drafts,
        },
    }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a request by ID or return 404.
pub async fn find_request(pool: &sqlx::PgPool, request_id: DbId) -> AppResult<FeedbackRequest> {
    RequestRepo::find_by_id(pool, request_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "FeedbackRequest",
                id: request_id,
            })
        })
}

/// Load a request and enforce the viewer access rule.
pub async fn find_request_for_viewer(
    pool: &sqlx::PgPool,
    auth: &AuthUser,
    request_id: DbId,
) -> AppResult<FeedbackRequest> {
    let request = find_request(pool, request_id).await?;
    if !can_view_request(&auth.actor(), &request.parties()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this feedback request".into(),
        )));
    }
    Ok(request)
}

/// Load a request and enforce the respondent access rule.
pub async fn find_request_for_respondent(
    pool: &sqlx::PgPool,
    auth: &AuthUser,
    request_id: DbId,
) -> AppResult<FeedbackRequest> {
    let request = find_request(pool, request_id).await?;
    if !can_respond(&auth.actor(), &request.parties()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the assignee can answer this feedback request".into(),
        )));
    }
    Ok(request)
}
