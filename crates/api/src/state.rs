use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::Notifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reviewdrop_db::DbPool,
    /// Server configuration (admin token, webhook URL, timeouts).
    pub config: Arc<ServerConfig>,
    /// Fire-and-forget webhook dispatcher.
    pub notifier: Arc<Notifier>,
}
