//! Wage progression models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WageAmounts;

/// One dated wage in the history of a scale step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionPoint {
    /// The date this wage takes effect.
    pub effective_date: NaiveDate,
    /// The wage figures.
    pub wage: WageAmounts,
    /// Difference to the previous point; `None` for the first.
    pub increase_from_previous: Option<WageAmounts>,
    /// Monthly increase relative to the previous point, in percent.
    pub percent_increase: Option<Decimal>,
}

/// The wage of a specific step at a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepWage {
    /// The step number.
    pub step_number: u32,
    /// The effective date of the row in force.
    pub effective_date: NaiveDate,
    /// The wage figures.
    pub wage: WageAmounts,
}

/// A progression annotated with what is in force and what comes next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedProgression {
    /// The scale number.
    pub scale_number: u32,
    /// The step number.
    pub step_number: u32,
    /// The reference date.
    pub as_of: NaiveDate,
    /// All known points, oldest first, including future-dated ones.
    pub points: Vec<ProgressionPoint>,
    /// The point in force on `as_of`.
    pub current: Option<ProgressionPoint>,
    /// The earliest point not yet in force on `as_of`.
    pub next_scheduled: Option<ProgressionPoint>,
    /// Difference between `next_scheduled` and `current`.
    pub increase_to_next: Option<WageAmounts>,
    /// The wage one step up in the same scale on `as_of`, if there is one.
    pub next_step: Option<StepWage>,
}
