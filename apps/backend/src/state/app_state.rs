use std::sync::Arc;

use crate::config::game::GameConfig;
use crate::repos::{GameStore, InMemoryStore};

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session and move store
    store: Arc<dyn GameStore>,
    /// Immutable game rules
    config: Arc<GameConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, config: GameConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A state backed by the process-local store.
    pub fn in_memory(config: GameConfig) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), config)
    }
}
