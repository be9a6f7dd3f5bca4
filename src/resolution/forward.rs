//! Forward lookup: (scale, step, date) to wage.

use chrono::NaiveDate;

use crate::config::WageScaleTable;
use crate::error::{EngineError, EngineResult};
use crate::models::ResolvedWage;

/// Resolves the wage of a scale step on a given date.
///
/// Picks the row with the greatest effective date on or before `as_of`.
///
/// # Returns
///
/// Returns the wage in force, or an error if:
/// - The scale is not defined (`ScaleNotFound`)
/// - The step is outside the scale or has no rows (`StepNotFound`)
/// - `as_of` precedes the earliest known row (`OutOfRange`); the earliest
///   row is never substituted
///
/// # Examples
///
/// ```no_run
/// use cao_engine::config::ConfigLoader;
/// use cao_engine::resolution::resolve_forward;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cao_vvt")?;
/// let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let resolved = resolve_forward(loader.table(), 6, 2, date)?;
/// println!("Effective since {}: EUR {}", resolved.effective_date, resolved.wage.monthly_wage);
/// # Ok::<(), cao_engine::error::EngineError>(())
/// ```
pub fn resolve_forward(
    table: &WageScaleTable,
    scale: u32,
    step: u32,
    as_of: NaiveDate,
) -> EngineResult<ResolvedWage> {
    let definition = table.scale(scale)?;
    if !definition.contains_step(step) {
        return Err(EngineError::StepNotFound { scale, step });
    }

    let history = table.history(scale, step);
    let earliest = history
        .first()
        .ok_or(EngineError::StepNotFound { scale, step })?;

    // History is sorted ascending, so search from the end
    let rate = history
        .iter()
        .rfind(|r| r.effective_date <= as_of)
        .ok_or(EngineError::OutOfRange {
            scale,
            step,
            date: as_of,
            earliest: earliest.effective_date,
        })?;

    Ok(ResolvedWage {
        scale_number: scale,
        step_number: step,
        as_of,
        effective_date: rate.effective_date,
        wage: rate.wage,
    })
}

/// Returns the steps of a scale that have a wage in force on `as_of`.
///
/// The result is sorted ascending and may be empty when `as_of` precedes
/// every row of the scale.
pub fn get_available_steps(
    table: &WageScaleTable,
    scale: u32,
    as_of: NaiveDate,
) -> EngineResult<Vec<u32>> {
    let definition = table.scale(scale)?;

    Ok((definition.min_step..=definition.max_step)
        .filter(|step| {
            table
                .history(scale, *step)
                .first()
                .is_some_and(|r| r.effective_date <= as_of)
        })
        .collect())
}
