//! Wage progression of a scale step over time.

use crate::config::WageScaleTable;
use crate::error::{EngineError, EngineResult};
use crate::models::ProgressionPoint;

use super::percent_change;

/// Returns the dated wage history of a scale step, oldest first.
///
/// Each point carries the increase over the previous point. Future-dated
/// rows (negotiated raises not yet in force) are included. The result is
/// empty when the step is defined but has no rows.
///
/// # Returns
///
/// Returns the progression, or `ScaleNotFound` / `StepNotFound` when the
/// scale is unknown or the step lies outside it.
pub fn get_progression(
    table: &WageScaleTable,
    scale: u32,
    step: u32,
) -> EngineResult<Vec<ProgressionPoint>> {
    let definition = table.scale(scale)?;
    if !definition.contains_step(step) {
        return Err(EngineError::StepNotFound { scale, step });
    }

    let history = table.history(scale, step);
    let mut points = Vec::with_capacity(history.len());
    let mut previous = None;

    for rate in history {
        let (increase_from_previous, percent_increase) = match previous {
            Some(prev) => (
                Some(rate.wage - prev),
                percent_change(prev.monthly_wage, rate.wage.monthly_wage),
            ),
            None => (None, None),
        };
        points.push(ProgressionPoint {
            effective_date: rate.effective_date,
            wage: rate.wage,
            increase_from_previous,
            percent_increase,
        });
        previous = Some(rate.wage);
    }

    Ok(points)
}
