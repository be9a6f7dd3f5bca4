//! The immutable wage scale table.

use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{WageRate, WageScaleDefinition};

use super::AgreementMetadata;

/// Scale definitions and dated wage rows of one collective agreement.
///
/// The table is validated on construction and never mutated afterwards;
/// refreshed reference data produces a new table.
///
/// Invariants:
/// - scale numbers are unique and every scale has `min_step <= max_step`
/// - every rate names a known scale and a step inside its range
/// - the rows of each (scale, step) are sorted by strictly increasing
///   effective date
#[derive(Debug, Clone)]
pub struct WageScaleTable {
    metadata: AgreementMetadata,
    scales: BTreeMap<u32, WageScaleDefinition>,
    rates: BTreeMap<(u32, u32), Vec<WageRate>>,
}

impl WageScaleTable {
    /// Builds a table, rejecting data that breaks an invariant.
    pub fn new(
        metadata: AgreementMetadata,
        scales: Vec<WageScaleDefinition>,
        rates: Vec<WageRate>,
    ) -> EngineResult<Self> {
        let mut scale_map = BTreeMap::new();
        for scale in scales {
            if scale.min_step > scale.max_step {
                return Err(EngineError::InvalidTable {
                    message: format!(
                        "scale {} has min_step {} above max_step {}",
                        scale.scale_number, scale.min_step, scale.max_step
                    ),
                });
            }
            let number = scale.scale_number;
            if scale_map.insert(number, scale).is_some() {
                return Err(EngineError::InvalidTable {
                    message: format!("scale {} is defined more than once", number),
                });
            }
        }

        let mut rate_map: BTreeMap<(u32, u32), Vec<WageRate>> = BTreeMap::new();
        for rate in rates {
            let scale = scale_map
                .get(&rate.scale_number)
                .ok_or_else(|| EngineError::InvalidTable {
                    message: format!(
                        "rate effective {} references unknown scale {}",
                        rate.effective_date, rate.scale_number
                    ),
                })?;
            if !scale.contains_step(rate.step_number) {
                return Err(EngineError::InvalidTable {
                    message: format!(
                        "rate effective {} references step {} outside scale {} ({}..={})",
                        rate.effective_date,
                        rate.step_number,
                        rate.scale_number,
                        scale.min_step,
                        scale.max_step
                    ),
                });
            }
            rate_map
                .entry((rate.scale_number, rate.step_number))
                .or_default()
                .push(rate);
        }

        for ((scale, step), history) in rate_map.iter_mut() {
            history.sort_by_key(|r| r.effective_date);
            if let Some(pair) = history
                .windows(2)
                .find(|pair| pair[0].effective_date == pair[1].effective_date)
            {
                return Err(EngineError::InvalidTable {
                    message: format!(
                        "scale {} step {} has two rates effective {}",
                        scale, step, pair[0].effective_date
                    ),
                });
            }
        }

        Ok(Self {
            metadata,
            scales: scale_map,
            rates: rate_map,
        })
    }

    /// Returns the agreement metadata.
    pub fn metadata(&self) -> &AgreementMetadata {
        &self.metadata
    }

    /// Gets a scale definition by number.
    pub fn scale(&self, scale_number: u32) -> EngineResult<&WageScaleDefinition> {
        self.scales
            .get(&scale_number)
            .ok_or(EngineError::ScaleNotFound {
                scale: scale_number,
            })
    }

    /// Returns all scale definitions ordered by scale number.
    pub fn scales(&self) -> impl Iterator<Item = &WageScaleDefinition> {
        self.scales.values()
    }

    /// Returns the dated rows of one step, oldest first.
    ///
    /// Empty when the step has no rows.
    pub fn history(&self, scale_number: u32, step_number: u32) -> &[WageRate] {
        self.rates
            .get(&(scale_number, step_number))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates over every (scale, step) history, ordered by scale then step.
    pub fn histories(&self) -> impl Iterator<Item = (u32, u32, &[WageRate])> {
        self.rates
            .iter()
            .map(|((scale, step), history)| (*scale, *step, history.as_slice()))
    }

    /// Total number of wage rows.
    pub fn rate_count(&self) -> usize {
        self.rates.values().map(Vec::len).sum()
    }
}
