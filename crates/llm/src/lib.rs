//! Candidly completion-API client.
//!
//! Wraps the hosted chat-completions HTTP API behind a small typed
//! client. Calls are single-shot and uncached with no retry; callers
//! catch [`client::LlmError`] and substitute their static fallbacks.

pub mod client;
pub mod config;

pub use client::{LlmClient, LlmError};
pub use config::LlmConfig;
