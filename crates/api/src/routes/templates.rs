//! Route definitions for feedback templates.
//!
//! ```text
//! GET  /                    list templates with question counts
//! POST /                    create template with ordered questions
//! GET  /{id}                template detail with questions
//! POST /extract-questions   extract question lines from a screenshot
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(templates::list).post(templates::create))
        .route("/extract-questions", post(templates::extract_questions))
        .route("/{id}", get(templates::get))
}
