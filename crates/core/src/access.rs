//! Access-control rules for feedback requests.
//!
//! Pure functions of (actor, request parties) with no database access.
//! The API layer builds the argument structs from loaded rows and maps
//! `false` / `Err` to 403 responses.

use crate::error::CoreError;
use crate::types::DbId;

/// The authenticated user performing an action.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: DbId,
    pub email: String,
    pub is_admin: bool,
}

/// The parties attached to a feedback request.
#[derive(Debug, Clone)]
pub struct RequestParties {
    pub created_by_id: DbId,
    pub target_email: Option<String>,
    pub assigned_to_email: String,
}

/// Can the actor view a feedback request and its report?
///
/// Admins see everything; otherwise the creator, the target person
/// (matched by email), and the assignee. The reviewer is deliberately
/// not granted access: they see the feedback when the creator shares it.
pub fn can_view_request(actor: &Actor, parties: &RequestParties) -> bool {
    if actor.is_admin {
        return true;
    }
    if parties.created_by_id == actor.user_id {
        return true;
    }
    if parties.target_email.as_deref() == Some(actor.email.as_str()) {
        return true;
    }
    parties.assigned_to_email == actor.email
}

/// Can the actor answer (save drafts / submit) a feedback request?
///
/// Only the assignee. Admins do not get to answer on someone's behalf.
pub fn can_respond(actor: &Actor, parties: &RequestParties) -> bool {
    parties.assigned_to_email == actor.email
}

/// Permission flags carried on a user row.
#[derive(Debug, Clone, Copy)]
pub struct PermissionFlags {
    pub can_create_templates: bool,
    pub can_create_requests_for_others: bool,
    pub is_admin: bool,
}

/// Ensure the user may create feedback templates. Admin overrides.
pub fn ensure_can_create_templates(flags: PermissionFlags) -> Result<(), CoreError> {
    if flags.is_admin || flags.can_create_templates {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You do not have permission to create templates".to_string(),
        ))
    }
}

/// Ensure the user may create a feedback request assigned to `assignee_email`.
///
/// Anyone may create a request they will answer themselves; assigning to
/// someone else requires the dedicated flag. Admin overrides.
pub fn ensure_can_assign(
    flags: PermissionFlags,
    own_email: &str,
    assignee_email: &str,
) -> Result<(), CoreError> {
    if flags.is_admin || flags.can_create_requests_for_others {
        return Ok(());
    }
    if assignee_email.eq_ignore_ascii_case(own_email) {
        return Ok(());
    }
    Err(CoreError::Forbidden(
        "You do not have permission to create feedback requests for others".to_string(),
    ))
}
