use std::sync::Arc;

use tracing::info;

use crate::config::db::{DbSettings, StoreKind};
use crate::config::game::GameConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::{GameStore, InMemoryStore, SeaStore};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: GameConfig,
    db: Option<DbSettings>,
    store: Option<Arc<dyn GameStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            db: None,
            store: None,
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Back the state with the store these settings describe.
    pub fn with_db(mut self, settings: DbSettings) -> Self {
        self.db = Some(settings);
        self
    }

    /// Use an already constructed store; takes precedence over `with_db`.
    pub fn with_store(mut self, store: Arc<dyn GameStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store: Arc<dyn GameStore> = match (self.store, self.db) {
            (Some(store), _) => store,
            (None, Some(settings)) if settings.kind.is_sql() => {
                // single entrypoint: build + migrate
                let conn = bootstrap_db(&settings).await?;
                Arc::new(SeaStore::new(conn))
            }
            (None, _) => Arc::new(InMemoryStore::new()),
        };

        info!(
            capacity = self.config.capacity,
            choices = ?self.config.choices.labels(),
            "application state ready"
        );
        Ok(AppState::new(store, self.config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
