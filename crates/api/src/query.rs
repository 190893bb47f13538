//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Search parameters for autocomplete endpoints (`?q=`).
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}
