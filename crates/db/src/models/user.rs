//! User entity model and DTOs.

use candidly_core::access::PermissionFlags;
use candidly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub can_create_templates: bool,
    pub can_create_requests_for_others: bool,
    pub is_admin: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl User {
    /// The user's permission flags as the core access-control struct.
    pub fn permission_flags(&self) -> PermissionFlags {
        PermissionFlags {
            can_create_templates: self.can_create_templates,
            can_create_requests_for_others: self.can_create_requests_for_others,
            is_admin: self.is_admin,
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub can_create_templates: bool,
    pub can_create_requests_for_others: bool,
    pub is_admin: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            can_create_templates: user.can_create_templates,
            can_create_requests_for_others: user.can_create_requests_for_others,
            is_admin: user.is_admin,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user (admin user management).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub can_create_templates: bool,
    #[serde(default)]
    pub can_create_requests_for_others: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// DTO for updating a user's permission flags.
#[derive(Debug, Deserialize)]
pub struct UpdatePermissions {
    pub can_create_templates: Option<bool>,
    pub can_create_requests_for_others: Option<bool>,
    pub is_admin: Option<bool>,
}

/// Compact row for the assignment autocomplete.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSuggestion {
    pub id: DbId,
    pub email: String,
    pub name: String,
}
