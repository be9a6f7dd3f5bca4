//! Wage scale resolution for the CAO wage engine.
//!
//! This module contains the lookups over a [`WageScaleTable`] snapshot:
//! forward lookup of a step's wage on a date, reverse lookup of the most
//! likely step for an observed salary with confidence scoring and CAO
//! compliance, the dated progression of a step, and the projection of the
//! next scheduled wage. Every function is pure over its arguments.
//!
//! [`WageScaleTable`]: crate::config::WageScaleTable

mod compliance;
mod confidence;
mod forward;
mod progression;
mod projection;
mod reverse;

#[cfg(test)]
pub(crate) mod fixtures;

use rust_decimal::{Decimal, RoundingStrategy};

pub use compliance::compliance_status;
pub use confidence::{NON_EXACT_CEILING, confidence_score, confidence_tier};
pub use forward::{get_available_steps, resolve_forward};
pub use progression::get_progression;
pub use projection::project_progression;
pub use reverse::resolve_reverse;

/// Relative change from `previous` to `current` in percent, rounded to two
/// decimals.
///
/// `None` when `previous` is not positive.
///
/// # Examples
///
/// ```
/// use cao_engine::resolution::percent_change;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     percent_change(Decimal::from(20), Decimal::from(22)),
///     Some(Decimal::from(10))
/// );
/// assert_eq!(percent_change(Decimal::ZERO, Decimal::from(22)), None);
/// ```
pub fn percent_change(previous: Decimal, current: Decimal) -> Option<Decimal> {
    if previous <= Decimal::ZERO {
        return None;
    }
    Some(
        ((current - previous) / previous * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    )
}
