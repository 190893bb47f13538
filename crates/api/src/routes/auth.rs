//! Route definitions for authentication.
//!
//! ```text
//! POST /login        email + password login
//! POST /dev-login    LOCAL_DEV_MODE auto-provisioned login
//! POST /refresh      rotate refresh token
//! POST /logout       revoke refresh session
//! GET  /me           current user profile
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/dev-login", post(auth::dev_login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
