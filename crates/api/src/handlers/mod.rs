//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod chat;
pub mod coaching;
pub mod requests;
pub mod responses;
pub mod templates;
pub mod users;
