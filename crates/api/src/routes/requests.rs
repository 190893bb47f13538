//! Route definitions for feedback requests, responses, and coaching.
//!
//! ```text
//! GET  /                                              dashboard list
//! POST /                                              create request
//! GET  /{id}                                          request detail
//! GET  /{id}/survey                                   interview payload
//! PUT  /{id}/draft                                    replace draft answers
//! POST /{id}/submit                                   submit and freeze
//! POST /{id}/responses/{question_id}/regenerate-summary
//!                                                     re-summarize a draft
//! GET  /{id}/report                                   submitted responses
//! POST /{id}/analyze-tone                             tone check of drafts
//! POST /{id}/coaching-guide                           delivery guide
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{coaching, requests, responses};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(requests::list).post(requests::create))
        .route("/{id}", get(requests::get))
        .route("/{id}/survey", get(requests::survey))
        .route("/{id}/draft", put(responses::save_draft))
        .route("/{id}/submit", post(responses::submit))
        .route(
            "/{id}/responses/{question_id}/regenerate-summary",
            post(responses::regenerate_summary),
        )
        .route("/{id}/report", get(responses::report))
        .route("/{id}/analyze-tone", post(coaching::analyze_tone))
        .route("/{id}/coaching-guide", post(coaching::coaching_guide))
}
