//! Candidly domain core.
//!
//! Pure domain logic shared by the database and API layers: ID/timestamp
//! aliases, the domain error type, question and status vocabularies,
//! access-control rules, chat transcript handling, prompt construction
//! for the hosted completion API, and screenshot validation.
//!
//! Nothing in this crate performs IO.

pub mod access;
pub mod chat;
pub mod error;
pub mod prompts;
pub mod questions;
pub mod screenshot;
pub mod status;
pub mod types;
