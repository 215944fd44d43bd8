use std::sync::Arc;

use crate::config::ServerConfig;
use crate::email::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: slimpath_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// SMTP mailer; `None` when email delivery is not configured, in which
    /// case sends are logged and skipped.
    pub mailer: Option<Arc<Mailer>>,
}
