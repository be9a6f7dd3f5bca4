//! Configuration loading and management for the CAO wage engine.
//!
//! This module loads the wage table (agreement metadata, scale definitions,
//! dated rates) and engine settings from YAML files, and keeps the current
//! table in a [`WageTableStore`] that hands out immutable snapshots.
//!
//! # Example
//!
//! ```no_run
//! use cao_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cao_vvt").unwrap();
//! println!("Loaded agreement: {}", config.table().metadata().name);
//! ```

mod loader;
mod store;
mod table;
mod types;

pub use loader::ConfigLoader;
pub use store::{TableSnapshot, WageTableStore};
pub use table::WageScaleTable;
pub use types::{AgreementMetadata, EngineSettings, MatchSettings, RateConfig, RateRow, ScalesConfig};
