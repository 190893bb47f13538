pub mod auth;
pub mod chat;
pub mod health;
pub mod requests;
pub mod templates;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                        login (public)
/// /auth/dev-login                                    dev login (public, LOCAL_DEV_MODE)
/// /auth/refresh                                      refresh (public)
/// /auth/logout                                       logout (requires auth)
/// /auth/me                                           current user (requires auth)
///
/// /users/search                                      email autocomplete (GET)
/// /admin/users                                       list, create (admin only)
/// /admin/users/{id}/permissions                      update flags (PUT, admin only)
///
/// /templates                                         list, create
/// /templates/{id}                                    detail with questions
/// /templates/extract-questions                       screenshot extraction (POST)
///
/// /requests                                          dashboard list, create
/// /requests/{id}                                     detail
/// /requests/{id}/survey                              interview payload (assignee)
/// /requests/{id}/draft                               save draft set (PUT, assignee)
/// /requests/{id}/submit                              submit (POST, assignee)
/// /requests/{id}/responses/{question_id}/regenerate-summary
///                                                    re-summarize draft (POST)
/// /requests/{id}/report                              submitted responses (GET)
/// /requests/{id}/analyze-tone                        tone check of drafts (POST)
/// /requests/{id}/coaching-guide                      delivery guide (POST)
///
/// /chat/{question_id}                                interview turn (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, dev-login, refresh, logout, me).
        .nest("/auth", auth::router())
        // User search + admin user management.
        .nest("/users", users::router())
        .nest("/admin/users", users::admin_router())
        // Templates and the screenshot extraction aid.
        .nest("/templates", templates::router())
        // Feedback requests, responses, reports, and coaching.
        .nest("/requests", requests::router())
        // Conversational interview turns.
        .nest("/chat", chat::router())
}
