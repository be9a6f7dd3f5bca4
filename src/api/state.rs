//! Application state for the CAO wage engine API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{ConfigLoader, EngineSettings, TableSnapshot, WageTableStore};

/// Shared application state.
///
/// Handlers take a fresh table snapshot per request; a refresh that lands
/// mid-request does not affect it.
#[derive(Clone)]
pub struct AppState {
    store: Arc<WageTableStore>,
    settings: Arc<EngineSettings>,
    config_dir: Arc<PathBuf>,
}

impl AppState {
    /// Creates the state from a loaded configuration and the directory it
    /// was loaded from.
    pub fn new(config: ConfigLoader, config_dir: impl Into<PathBuf>) -> Self {
        let (table, settings) = config.into_parts();
        Self {
            store: Arc::new(WageTableStore::new(table)),
            settings: Arc::new(settings),
            config_dir: Arc::new(config_dir.into()),
        }
    }

    /// Returns the current wage table snapshot.
    pub fn snapshot(&self) -> TableSnapshot {
        self.store.snapshot()
    }

    /// Returns the table store.
    pub fn store(&self) -> &Arc<WageTableStore> {
        &self.store
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the directory reference data is reloaded from.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
