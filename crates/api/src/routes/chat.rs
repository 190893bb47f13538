//! Route definitions for the conversational interview.
//!
//! ```text
//! POST /{question_id}   one interview turn
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/{question_id}", post(chat::chat_turn))
}
