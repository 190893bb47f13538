use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Local development mode (auto-provisioned dev user).
    pub local_dev: LocalDevConfig,
}

/// Local development mode: a fixed user is auto-provisioned and logged
/// in via `POST /auth/dev-login` so the app runs without real accounts.
#[derive(Debug, Clone)]
pub struct LocalDevConfig {
    pub enabled: bool,
    pub email: String,
    pub name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `LOCAL_DEV_MODE`       | `true`                     |
    /// | `LOCAL_DEV_EMAIL`      | `dev@example.com`          |
    /// | `LOCAL_DEV_NAME`       | `Dev User`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let local_dev = LocalDevConfig {
            enabled: std::env::var("LOCAL_DEV_MODE")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            email: std::env::var("LOCAL_DEV_EMAIL").unwrap_or_else(|_| "dev@example.com".into()),
            name: std::env::var("LOCAL_DEV_NAME").unwrap_or_else(|_| "Dev User".into()),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            local_dev,
        }
    }
}
