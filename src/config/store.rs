//! Versioned snapshots of the wage table.
//!
//! Readers take an [`Arc`] snapshot and keep using it for the rest of their
//! call; a refresh swaps in a whole new table, so a reader never sees a
//! partially updated one.

use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::EngineResult;

use super::loader::ConfigLoader;
use super::table::WageScaleTable;

/// A wage table together with the generation it was published as.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    /// Increases by one on every swap; the first table is generation 1.
    pub generation: u64,
    /// The table.
    pub table: Arc<WageScaleTable>,
}

/// Holds the current wage table and replaces it atomically.
///
/// # Example
///
/// ```no_run
/// use cao_engine::config::{ConfigLoader, WageTableStore};
///
/// let (table, _settings) = ConfigLoader::load("./config/cao_vvt")?.into_parts();
/// let store = WageTableStore::new(table);
///
/// let snapshot = store.snapshot();
/// assert_eq!(snapshot.generation, 1);
/// # Ok::<(), cao_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct WageTableStore {
    current: RwLock<TableSnapshot>,
}

impl WageTableStore {
    /// Creates a store publishing `table` as generation 1.
    pub fn new(table: WageScaleTable) -> Self {
        Self {
            current: RwLock::new(TableSnapshot {
                generation: 1,
                table: Arc::new(table),
            }),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> TableSnapshot {
        // A poisoned lock still holds a complete snapshot; swaps never leave
        // it half-written.
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Publishes `table` and returns the new generation.
    pub fn replace(&self, table: WageScaleTable) -> u64 {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let generation = guard.generation + 1;
        *guard = TableSnapshot {
            generation,
            table: Arc::new(table),
        };
        info!(
            generation,
            version = %guard.table.metadata().version,
            rates = guard.table.rate_count(),
            "Published wage table snapshot"
        );
        generation
    }

    /// Reloads the table from a configuration directory and publishes it.
    ///
    /// On error the current snapshot stays in place.
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> EngineResult<u64> {
        let (table, _) = ConfigLoader::load(path)?.into_parts();
        Ok(self.replace(table))
    }
}
