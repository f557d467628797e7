use std::sync::Arc;

use lostfound_core::storage::FileStore;
use lostfound_db::store::ItemStore;

use crate::config::ServerConfig;
use crate::services::{ClaimVerifier, ItemService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Item persistence, also used for health checks.
    pub store: Arc<dyn ItemStore>,
    /// Item lifecycle operations.
    pub items: ItemService,
    /// Claim answer verification.
    pub claims: ClaimVerifier,
}

impl AppState {
    /// Wire the services to the given stores.
    pub fn new(config: ServerConfig, store: Arc<dyn ItemStore>, files: Arc<dyn FileStore>) -> Self {
        Self {
            config: Arc::new(config),
            items: ItemService::new(Arc::clone(&store), files),
            claims: ClaimVerifier::new(Arc::clone(&store)),
            store,
        }
    }
}
