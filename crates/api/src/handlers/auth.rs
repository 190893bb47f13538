//! Handlers for the `/auth` resource (login, dev-login, refresh, logout, me).

use axum::extract::State;
use axum::Json;
use candidly_core::error::CoreError;
use candidly_core::types::DbId;
use candidly_db::models::user::{User, UserResponse};
use candidly_db::repositories::{SessionRepo, UserRepo};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id, Utc::now()).await?;

    let response = create_auth_response(&state, user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/dev-login
///
/// LOCAL_DEV_MODE only: get-or-create the configured development user
/// (an admin with all permission flags), stamp the login time, and
/// return tokens. Rejected when dev mode is disabled.
pub async fn dev_login(State(state): State<AppState>) -> AppResult<Json<AuthResponse>> {
    if !state.config.local_dev.enabled {
        return Err(AppError::Core(CoreError::Forbidden(
            "Local development mode is disabled".into(),
        )));
    }

    let dev = &state.config.local_dev;
    let user = match UserRepo::find_by_email(&state.pool, &dev.email).await? {
        Some(user) => user,
        None => {
            // The dev user never logs in with this password; the column
            // is non-null, so give it a real hash anyway.
            let password_hash = hash_password(&uuid::Uuid::new_v4().to_string())
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            let user = UserRepo::create(
                &state.pool,
                &dev.email,
                &dev.name,
                &password_hash,
                true,
                true,
                true,
            )
            .await?;
            tracing::info!(user_id = user.id, email = %user.email, "Provisioned dev user");
            user
        }
    };

    UserRepo::record_login(&state.pool, user.id, Utc::now()).await?;

    let response = create_auth_response(&state, user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
/// The old session is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid refresh token".into())))?;

    let now = Utc::now();
    if !session.is_active(now) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Refresh token expired or revoked".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;

    SessionRepo::revoke(&state.pool, session.id, now).await?;

    let response = create_auth_response(&state, user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token's session.
pub async fn logout(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    if let Some(session) =
        SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash).await?
    {
        SessionRepo::revoke(&state.pool, session.id, Utc::now()).await?;
    }

    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/v1/auth/me
///
/// The current user's profile and permission flags.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })
        })?;
    Ok(Json(user.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate an access + refresh token pair for `user` and persist the
/// refresh session.
async fn create_auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.email, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_token, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(&state.pool, user.id, &refresh_hash, expires_at).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: user.into(),
    })
}

/// Verify that a user exists, returning the row.
pub async fn ensure_user_exists(pool: &sqlx::PgPool, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, user_id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })
    })
}
