//! Shared type aliases used across the workspace.

/// Primary key type for identities and profile rows.
pub type UserId = uuid::Uuid;

/// UTC timestamp type used for all persisted times.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
