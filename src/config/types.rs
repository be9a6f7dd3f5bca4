//! Configuration types for the CAO wage engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{WageAmounts, WageRate, WageScaleDefinition};

/// Metadata about the collective agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementMetadata {
    /// Short code of the agreement (e.g., "CAO-VVT").
    pub code: String,
    /// The human-readable name of the agreement.
    pub name: String,
    /// The version or term of the agreement.
    pub version: String,
    /// URL to the published agreement text.
    pub source_url: String,
}

/// Scales configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalesConfig {
    /// The scale definitions.
    pub scales: Vec<WageScaleDefinition>,
}

/// One wage row in a rates file.
#[derive(Debug, Clone, Deserialize)]
pub struct RateRow {
    /// The scale number.
    pub scale: u32,
    /// The step number.
    pub step: u32,
    /// Gross hourly wage.
    pub hourly: Decimal,
    /// Gross monthly wage.
    pub monthly: Decimal,
    /// Gross yearly wage.
    pub yearly: Decimal,
}

/// Rate configuration for a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// The wage rows.
    pub rates: Vec<RateRow>,
}

impl RateConfig {
    /// Expands the file into dated wage rows.
    pub fn into_wage_rates(self) -> Vec<WageRate> {
        let effective_date = self.effective_date;
        self.rates
            .into_iter()
            .map(|row| WageRate {
                scale_number: row.scale,
                step_number: row.step,
                effective_date,
                wage: WageAmounts {
                    hourly_wage: row.hourly,
                    monthly_wage: row.monthly,
                    yearly_wage: row.yearly,
                },
            })
            .collect()
    }
}

/// Tunable constants of the reverse lookup.
///
/// # Example
///
/// ```
/// use cao_engine::config::MatchSettings;
/// use rust_decimal::Decimal;
///
/// let settings = MatchSettings::default();
/// assert_eq!(settings.max_alternatives, 3);
/// assert_eq!(settings.exact_epsilon, Decimal::new(1, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Largest absolute difference still treated as an exact match.
    pub exact_epsilon: Decimal,
    /// Maximum number of alternative matches returned.
    pub max_alternatives: usize,
    /// Score points lost per percent of relative difference.
    pub decay_per_percent: Decimal,
    /// Score points added when a candidate's category matches the hint.
    pub category_bonus: Decimal,
    /// Lowest score in the high tier.
    pub high_threshold: Decimal,
    /// Lowest score in the medium tier.
    pub medium_threshold: Decimal,
    /// Difference, as a percentage of the matched wage, still compliant.
    pub compliance_tolerance_percent: Decimal,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            exact_epsilon: Decimal::new(1, 2),
            max_alternatives: 3,
            decay_per_percent: Decimal::from(10),
            category_bonus: Decimal::from(2),
            high_threshold: Decimal::from(90),
            medium_threshold: Decimal::from(70),
            compliance_tolerance_percent: Decimal::ONE,
        }
    }
}

/// Engine settings file structure (settings.yaml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Reverse lookup constants.
    pub matching: MatchSettings,
    /// Seconds between reference data reloads in the server.
    pub refresh_interval_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            matching: MatchSettings::default(),
            refresh_interval_secs: 3600,
        }
    }
}
