/// Domain-level error taxonomy shared by the db and api crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required field was absent after every fallback location was tried.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity} ({key})")]
    NotFound { entity: &'static str, key: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Server-side configuration is absent or unusable (e.g. no webhook
    /// secret configured). Surfaced as a 500, never a 401.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Identity or profile write failed during webhook provisioning.
    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
