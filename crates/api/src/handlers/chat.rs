//! Handler for one conversational interview turn.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use candidly_core::chat::{fallback_follow_up, is_final_message, ChatMessage};
use candidly_core::error::CoreError;
use candidly_core::prompts;
use candidly_core::types::DbId;
use candidly_db::repositories::TemplateRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::requests::find_request_for_respondent;
use crate::handlers::templates::find_template;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /chat/{question_id}`.
#[derive(Debug, Deserialize)]
pub struct ChatTurnInput {
    /// The respondent's latest message.
    pub message: String,
    /// The feedback request being answered.
    pub feedback_request_id: DbId,
    /// Prior turns of this interview, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// One interview turn: the follow-up question and whether the
/// respondent signalled they are finished.
#[derive(Debug, Serialize)]
pub struct ChatTurnOutput {
    pub response: String,
    pub is_final: bool,
}

/// POST /chat/{question_id}
///
/// Generate the next follow-up question for a discussion answer. The
/// stop decision is keyword detection on the respondent's message; the
/// completion API only words the follow-up, with a static fallback when
/// the call fails.
pub async fn chat_turn(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    Json(input): Json<ChatTurnInput>,
) -> AppResult<impl IntoResponse> {
    let message = input.message.trim();
    if message.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message must not be empty".into(),
        )));
    }

    let request =
        find_request_for_respondent(&state.pool, &auth, input.feedback_request_id).await?;

    let question = TemplateRepo::find_question(&state.pool, question_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Question",
                id: question_id,
            })
        })?;
    if question.template_id != request.template_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Question {question_id} does not belong to this feedback request"
        ))));
    }

    let template = find_template(&state.pool, request.template_id).await?;

    let is_final = is_final_message(message);

    let system_prompt = prompts::follow_up_system_prompt(
        &question.question_text,
        &request.target_name,
        request.context.as_deref(),
        template.is_supervisor_feedback,
    );

    let mut messages = Vec::with_capacity(input.history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(input.history.iter().cloned());
    messages.push(ChatMessage::user(message));

    let response = match state.llm.complete(&messages).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Follow-up generation failed, using static fallback");
            fallback_follow_up(message).to_string()
        }
    };

    tracing::info!(
        user_id = auth.user_id,
        request_id = request.id,
        question_id = question_id,
        is_final = is_final,
        "Chat turn"
    );

    Ok(Json(ChatTurnOutput { response, is_final }))
}
