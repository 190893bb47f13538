//! Repository for the `users` table.

use candidly_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{UpdatePermissions, User, UserSuggestion};

/// Column list for users queries.
const USER_COLUMNS: &str = "id, email, name, password_hash, can_create_templates, \
    can_create_requests_for_others, is_admin, last_login_at, created_at";

/// Maximum rows returned by the autocomplete search.
const SUGGESTION_LIMIT: i64 = 10;

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (emails are stored lowercased and unique).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY name");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Insert a new user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        name: &str,
        password_hash: &str,
        can_create_templates: bool,
        can_create_requests_for_others: bool,
        is_admin: bool,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (email, name, password_hash, can_create_templates,
                 can_create_requests_for_others, is_admin)
             VALUES (lower($1), $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(name)
            .bind(password_hash)
            .bind(can_create_templates)
            .bind(can_create_requests_for_others)
            .bind(is_admin)
            .fetch_one(pool)
            .await
    }

    /// Update a user's permission flags. Returns the updated row.
    pub async fn update_permissions(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePermissions,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                can_create_templates = COALESCE($1, can_create_templates),
                can_create_requests_for_others = COALESCE($2, can_create_requests_for_others),
                is_admin = COALESCE($3, is_admin)
             WHERE id = $4
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.can_create_templates)
            .bind(input.can_create_requests_for_others)
            .bind(input.is_admin)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Stamp a successful login.
    pub async fn record_login(
        pool: &PgPool,
        id: DbId,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Email-prefix autocomplete for the assignment picker, ordered by
    /// name and capped.
    pub async fn suggest(pool: &PgPool, prefix: &str) -> Result<Vec<UserSuggestion>, sqlx::Error> {
        sqlx::query_as::<_, UserSuggestion>(
            "SELECT id, email, name FROM users
             WHERE email LIKE lower($1) || '%'
             ORDER BY name
             LIMIT $2",
        )
        .bind(prefix)
        .bind(SUGGESTION_LIMIT)
        .fetch_all(pool)
        .await
    }
}
