//! Reverse lookup result models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SalaryBasis;

/// Coarse bucket for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// The salary matches a scale step closely.
    High,
    /// The salary is near a scale step.
    Medium,
    /// The match is a guess.
    Low,
}

/// How an observed salary compares to the matched CAO wage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Within the tolerance band around the CAO wage.
    Compliant,
    /// Paid above the CAO wage.
    OverCao,
    /// Paid below the CAO wage.
    UnderCao,
}

/// A ranked (scale, step) candidate for an observed salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// The scale number.
    pub scale: u32,
    /// The step number.
    pub step: u32,
    /// The category of the scale.
    pub scale_category: String,
    /// The candidate's wage in the lookup basis.
    pub wage: Decimal,
    /// Observed salary minus the candidate's wage.
    pub salary_difference: Decimal,
    /// Confidence score between 0 and 100.
    pub confidence_score: Decimal,
}

/// The outcome of a reverse lookup.
///
/// `exact_step` is only set when the salary equals a scale wage within the
/// configured epsilon; `nearest_step` always names the primary match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// The observed salary.
    pub input_salary: Decimal,
    /// The date the salary was observed on.
    pub input_date: NaiveDate,
    /// Which wage figure the salary was compared against.
    pub basis: SalaryBasis,
    /// The matched scale number.
    pub scale: u32,
    /// The matched scale's name.
    pub scale_name: String,
    /// The matched scale's category.
    pub scale_category: String,
    /// The step whose wage equals the salary, if any.
    pub exact_step: Option<u32>,
    /// The step whose wage is closest to the salary.
    pub nearest_step: Option<u32>,
    /// The matched step's wage in the lookup basis.
    pub matched_wage: Decimal,
    /// Observed salary minus the matched wage.
    pub salary_difference: Decimal,
    /// Confidence score between 0 and 100.
    pub confidence_score: Decimal,
    /// The tier the score falls in.
    pub confidence_tier: ConfidenceTier,
    /// Runner-up candidates, best first.
    pub alternative_matches: Vec<CandidateMatch>,
    /// Whether the salary complies with the matched CAO wage.
    pub compliance_status: ComplianceStatus,
}

impl DetectionResult {
    /// Returns true if the salary equals a scale wage.
    pub fn is_exact(&self) -> bool {
        self.exact_step.is_some()
    }
}
