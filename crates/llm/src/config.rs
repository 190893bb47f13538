//! Completion-API configuration loaded from environment variables.

/// Default model when `OPENAI_MODEL` is unset.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the completion-API client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key. `None` means every call fails fast and callers use
    /// their fallbacks -- the app stays usable without a key.
    pub api_key: Option<String>,
    /// Model name sent with every request.
    pub model: String,
    /// API base URL (override for proxies or compatible servers).
    pub base_url: String,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Default                     |
    /// |-------------------|-----------------------------|
    /// | `OPENAI_API_KEY`  | unset (fallback-only mode)  |
    /// | `OPENAI_MODEL`    | `gpt-4o`                    |
    /// | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Self {
            api_key,
            model,
            base_url,
        }
    }
}
