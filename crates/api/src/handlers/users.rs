//! Handlers for user search and admin user management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use candidly_core::error::CoreError;
use candidly_core::types::DbId;
use candidly_db::models::user::{CreateUser, UpdatePermissions, UserResponse};
use candidly_db::repositories::UserRepo;
use validator::ValidateEmail;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::ensure_user_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /users/search?q=
///
/// Email-prefix autocomplete for the assignment picker.
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let suggestions = UserRepo::suggest(&state.pool, params.q.trim()).await?;
    Ok(Json(DataResponse { data: suggestions }))
}

/// GET /admin/users
///
/// List all users with their permission flags.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(DataResponse { data: users }))
}

/// POST /admin/users
///
/// Create a user with permission flags (pre-seeding accounts).
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    if !input.email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid email address '{}'",
            input.email
        ))));
    }
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be blank".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &input.email,
        input.name.trim(),
        &password_hash,
        input.can_create_templates,
        input.can_create_requests_for_others,
        input.is_admin,
    )
    .await?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = user.id,
        email = %user.email,
        "User created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// PUT /admin/users/{id}/permissions
///
/// Update a user's permission flags.
pub async fn update_permissions(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdatePermissions>,
) -> AppResult<impl IntoResponse> {
    ensure_user_exists(&state.pool, user_id).await?;

    let user = UserRepo::update_permissions(&state.pool, user_id, &input).await?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = user_id,
        "User permissions updated"
    );

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}
