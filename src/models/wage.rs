//! Wage scale reference models.
//!
//! This module defines the scale definitions and dated wage rows that make up
//! a CAO wage table, plus the [`SalaryBasis`] used to pick which wage figure a
//! lookup compares against.

use std::ops::Sub;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A wage scale as defined by the collective agreement.
///
/// # Example
///
/// ```
/// use cao_engine::models::WageScaleDefinition;
///
/// let scale = WageScaleDefinition {
///     scale_number: 6,
///     scale_name: "Schaal 6".to_string(),
///     scale_category: "care".to_string(),
///     min_step: 0,
///     max_step: 3,
///     description: "Verzorgende IG".to_string(),
/// };
/// assert!(scale.contains_step(3));
/// assert!(!scale.contains_step(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageScaleDefinition {
    /// The scale number, unique within a table.
    pub scale_number: u32,
    /// The human-readable scale name.
    pub scale_name: String,
    /// The job family this scale belongs to, used as a reverse lookup hint.
    pub scale_category: String,
    /// The lowest step in the scale.
    pub min_step: u32,
    /// The highest step in the scale.
    pub max_step: u32,
    /// A description of the positions placed in this scale.
    #[serde(default)]
    pub description: String,
}

impl WageScaleDefinition {
    /// Returns true if `step` lies within `[min_step, max_step]`.
    pub fn contains_step(&self, step: u32) -> bool {
        (self.min_step..=self.max_step).contains(&step)
    }
}

/// Which wage figure a salary is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryBasis {
    /// Gross hourly wage.
    Hourly,
    /// Gross monthly wage.
    #[default]
    Monthly,
    /// Gross yearly wage.
    Yearly,
}

/// The hourly, monthly and yearly figures of a single wage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageAmounts {
    /// Gross hourly wage.
    pub hourly_wage: Decimal,
    /// Gross monthly wage.
    pub monthly_wage: Decimal,
    /// Gross yearly wage.
    pub yearly_wage: Decimal,
}

impl WageAmounts {
    /// Returns the figure for the given basis.
    pub fn amount(&self, basis: SalaryBasis) -> Decimal {
        match basis {
            SalaryBasis::Hourly => self.hourly_wage,
            SalaryBasis::Monthly => self.monthly_wage,
            SalaryBasis::Yearly => self.yearly_wage,
        }
    }
}

impl Sub for WageAmounts {
    type Output = WageAmounts;

    fn sub(self, rhs: Self) -> Self::Output {
        WageAmounts {
            hourly_wage: self.hourly_wage - rhs.hourly_wage,
            monthly_wage: self.monthly_wage - rhs.monthly_wage,
            yearly_wage: self.yearly_wage - rhs.yearly_wage,
        }
    }
}

/// A dated wage row for one step of one scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRate {
    /// The scale number.
    pub scale_number: u32,
    /// The step number within the scale.
    pub step_number: u32,
    /// The date from which this wage applies until superseded.
    pub effective_date: NaiveDate,
    /// The wage figures.
    pub wage: WageAmounts,
}

/// The outcome of a forward lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWage {
    /// The scale number.
    pub scale_number: u32,
    /// The step number.
    pub step_number: u32,
    /// The date the lookup was made for.
    pub as_of: NaiveDate,
    /// The effective date of the row that applies on `as_of`.
    pub effective_date: NaiveDate,
    /// The wage figures in effect.
    pub wage: WageAmounts,
}
