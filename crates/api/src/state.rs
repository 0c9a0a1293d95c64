use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::LogoStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: qrlanding_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object store for uploaded logos.
    pub storage: Arc<dyn LogoStorage>,
}
