//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a CAO wage
//! table and engine settings from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::table::WageScaleTable;
use super::types::{AgreementMetadata, EngineSettings, RateConfig, ScalesConfig};

/// Loads and provides access to the wage table and engine settings.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/cao_vvt/
/// ├── agreement.yaml   # Agreement metadata
/// ├── scales.yaml      # Scale definitions
/// ├── settings.yaml    # Matching constants (optional)
/// └── rates/
///     └── 2024-07-01.yaml  # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use cao_engine::config::ConfigLoader;
/// use cao_engine::resolution::resolve_forward;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cao_vvt").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let resolved = resolve_forward(loader.table(), 6, 2, date).unwrap();
/// println!("Monthly wage: EUR {}", resolved.wage.monthly_wage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    table: WageScaleTable,
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The rates break a table invariant (unknown scale, step out of
    ///   range, two rows for the same step and date)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<AgreementMetadata>(&path.join("agreement.yaml"))?;
        let scales = Self::load_yaml::<ScalesConfig>(&path.join("scales.yaml"))?;

        let settings_path = path.join("settings.yaml");
        let settings = if settings_path.exists() {
            Self::load_yaml::<EngineSettings>(&settings_path)?
        } else {
            EngineSettings::default()
        };

        let rate_files = Self::load_rates(&path.join("rates"))?;
        let file_count = rate_files.len();
        let rates = rate_files
            .into_iter()
            .flat_map(RateConfig::into_wage_rates)
            .collect();

        let table = WageScaleTable::new(metadata, scales.scales, rates)?;
        debug!(
            agreement = %table.metadata().code,
            version = %table.metadata().version,
            scales = table.scales().count(),
            rate_files = file_count,
            rates = table.rate_count(),
            "Loaded wage table"
        );

        Ok(Self { table, settings })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the loaded wage table.
    pub fn table(&self) -> &WageScaleTable {
        &self.table
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Splits the loader into its table and settings.
    pub fn into_parts(self) -> (WageScaleTable, EngineSettings) {
        (self.table, self.settings)
    }
}
