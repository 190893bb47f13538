//! Route definitions for user search and admin user management.
//!
//! The autocomplete is mounted under `/users`; management routes are a
//! separate `/admin/users` group guarded by [`RequireAdmin`] extractors
//! in the handlers.
//!
//! [`RequireAdmin`]: crate::middleware::rbac::RequireAdmin

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User-facing routes, mounted at `/users`.
///
/// ```text
/// GET /search?q=    email autocomplete for assignment
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(users::search))
}

/// Admin user management, mounted at `/admin/users`.
///
/// ```text
/// GET  /                   list users
/// POST /                   create user
/// PUT  /{id}/permissions   update permission flags
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/{id}/permissions", put(users::update_permissions))
}
