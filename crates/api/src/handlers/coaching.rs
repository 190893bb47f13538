//! Handlers for tone analysis and the delivery coaching guide.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use candidly_core::chat::ChatMessage;
use candidly_core::error::CoreError;
use candidly_core::types::DbId;
use candidly_core::{prompts, status};
use candidly_db::models::response::ReportLine;
use candidly_db::repositories::ResponseRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::requests::{find_request_for_respondent, find_request_for_viewer};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Tone verdict over the draft answers.
///
/// Parsed best-effort from the model's JSON; any parse failure yields
/// [`ToneAnalysis::fallback`].
#[derive(Debug, Serialize, Deserialize)]
pub struct ToneAnalysis {
    pub overall_tone: String,
    #[serde(default)]
    pub concerns: Vec<String>,
}

impl ToneAnalysis {
    /// Conservative default when the model is unavailable or returns
    /// something unparseable.
    fn fallback() -> Self {
        Self {
            overall_tone: "neutral".to_string(),
            concerns: Vec::new(),
        }
    }
}

/// The generated delivery coaching guide.
#[derive(Debug, Serialize)]
pub struct CoachingGuide {
    pub guide: String,
}

/// POST /requests/{id}/analyze-tone
///
/// Tone / safety analysis of the assignee's current draft summaries,
/// run before submission while edits are still possible.
pub async fn analyze_tone(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_request_for_respondent(&state.pool, &auth, request_id).await?;

    let drafts = ResponseRepo::list_drafts(&state.pool, request_id).await?;
    let summaries: Vec<String> = drafts
        .iter()
        .filter_map(|r| r.discussion_summary.clone())
        .filter(|s| !s.trim().is_empty())
        .collect();

    // Nothing written yet: nothing to warn about.
    if summaries.is_empty() {
        return Ok(Json(DataResponse {
            data: ToneAnalysis::fallback(),
        }));
    }

    let prompt = prompts::tone_analysis_prompt(&summaries);
    let analysis = match state.llm.complete(&[ChatMessage::user(prompt)]).await {
        Ok(text) => parse_tone_analysis(&text).unwrap_or_else(ToneAnalysis::fallback),
        Err(e) => {
            tracing::warn!(error = %e, "Tone analysis failed, using conservative default");
            ToneAnalysis::fallback()
        }
    };

    tracing::info!(
        user_id = auth.user_id,
        request_id = request_id,
        overall_tone = %analysis.overall_tone,
        concern_count = analysis.concerns.len(),
        "Tone analysis"
    );

    Ok(Json(DataResponse { data: analysis }))
}

/// POST /requests/{id}/coaching-guide
///
/// Delivery coaching guide derived from the submitted responses and the
/// relationship context. Only meaningful once the request is completed.
pub async fn coaching_guide(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request_for_viewer(&state.pool, &auth, request_id).await?;
    if request.status != status::STATUS_COMPLETED {
        return Err(AppError::Core(CoreError::Conflict(
            "Coaching guides are generated after feedback is submitted".into(),
        )));
    }

    let lines = ResponseRepo::report(&state.pool, request_id).await?;
    let summaries: Vec<String> = lines.iter().map(format_report_line).collect();

    let prompt = prompts::coaching_guide_prompt(
        &request.target_name,
        request.context.as_deref(),
        &summaries,
    );
    let guide = match state.llm.complete(&[ChatMessage::user(prompt)]).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Coaching guide generation failed, using static fallback");
            prompts::fallback_coaching_guide(&request.target_name)
        }
    };

    tracing::info!(
        user_id = auth.user_id,
        request_id = request_id,
        "Coaching guide generated"
    );

    Ok(Json(DataResponse {
        data: CoachingGuide { guide },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Render one report line as a prompt bullet.
fn format_report_line(line: &ReportLine) -> String {
    let answer = if let Some(rating) = line.rating_value {
        format!("rated {rating}/5")
    } else if let Some(ref agreement) = line.agreement_value {
        agreement.replace('_', " ")
    } else if let Some(ref summary) = line.discussion_summary {
        summary.clone()
    } else {
        "no answer".to_string()
    };
    format!("{}: {answer}", line.question_text)
}

/// Best-effort parse of the model's tone JSON.
///
/// Tries the raw text first, then the outermost brace span (models
/// sometimes wrap JSON in code fences or prose).
fn parse_tone_analysis(text: &str) -> Option<ToneAnalysis> {
    if let Ok(parsed) = serde_json::from_str::<ToneAnalysis>(text.trim()) {
        return Some(parsed);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<ToneAnalysis>(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tone_analysis_plain_json() {
        let parsed = parse_tone_analysis(
            r#"{"overall_tone": "harsh", "concerns": ["Uses 'never' about delegation"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.overall_tone, "harsh");
        assert_eq!(parsed.concerns.len(), 1);
    }

    #[test]
    fn test_parse_tone_analysis_fenced_json() {
        let text = "```json\n{\"overall_tone\": \"supportive\", \"concerns\": []}\n```";
        let parsed = parse_tone_analysis(text).unwrap();
        assert_eq!(parsed.overall_tone, "supportive");
        assert!(parsed.concerns.is_empty());
    }

    #[test]
    fn test_parse_tone_analysis_garbage_is_none() {
        assert!(parse_tone_analysis("The tone seems fine to me!").is_none());
    }

    #[test]
    fn test_format_report_line_variants() {
        let base = ReportLine {
            question_id: 1,
            question_text: "How is their communication?".to_string(),
            question_type: "rating".to_string(),
            order_index: 0,
            rating_value: Some(4),
            agreement_value: None,
            discussion_summary: None,
            submitted_at: None,
        };
        assert_eq!(format_report_line(&base), "How is their communication?: rated 4/5");

        let agreement = ReportLine {
            rating_value: None,
            agreement_value: Some("strongly_agree".to_string()),
            ..base.clone()
        };
        assert_eq!(
            format_report_line(&agreement),
            "How is their communication?: strongly agree"
        );
    }
}
