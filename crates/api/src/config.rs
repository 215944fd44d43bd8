use crate::auth::jwt::JwtConfig;

/// Fallback public URL used in magic-link emails when neither
/// `APP_BASE_URL` nor the request host is available.
pub const PRODUCTION_BASE_URL: &str = "https://slimpathai.com";

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Expected checkout webhook secret. `None` means the webhook is
    /// unconfigured and every delivery gets a configuration error.
    pub webhook_secret: Option<String>,
    /// Public base URL for links in emails (e.g. the magic-link redirect).
    pub app_base_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `WEBHOOK_SECRET`        | -- (falls back to `PUBLIC_WEBHOOK_SECRET`) |
    /// | `APP_BASE_URL`          | --                       |
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

        // The legacy variable name survives from before the secret was
        // moved server-side only.
        let webhook_secret = std::env::var("WEBHOOK_SECRET")
            .or_else(|_| std::env::var("PUBLIC_WEBHOOK_SECRET"))
            .ok()
            .filter(|s| !s.is_empty());

        let app_base_url = std::env::var("APP_BASE_URL").ok().filter(|s| !s.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            webhook_secret,
            app_base_url,
        }
    }
}
