use std::sync::Arc;

use agora_db::store::ResourceStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Article, comment and user storage.
    pub store: Arc<dyn ResourceStore>,
    /// Server configuration (accessed by extractors and handlers).
    pub config: Arc<ServerConfig>,
}
