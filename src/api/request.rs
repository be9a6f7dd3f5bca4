//! Request types for the CAO wage engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EmploymentRecord, RecordSource, SalaryBasis};

/// Request body for `POST /wages/forward`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardRequest {
    /// The wage scale.
    pub scale: u32,
    /// The step within the scale.
    pub step: u32,
    /// The date the wage should be in force on.
    pub as_of: NaiveDate,
}

/// Request body for `POST /wages/reverse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseRequest {
    /// The observed salary.
    pub salary: Decimal,
    /// The date the salary was paid on.
    pub as_of: NaiveDate,
    /// Which wage figure the salary is expressed in.
    #[serde(default)]
    pub basis: SalaryBasis,
    /// A scale category to favour when candidates score close together.
    #[serde(default)]
    pub category_hint: Option<String>,
}

/// Request body for `POST /timeline`.
///
/// `records` come from the system of record and win every conflict;
/// `external_sources` are merged after them in the order given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineRequest {
    /// Contract records from the system of record.
    #[serde(default)]
    pub records: Vec<EmploymentRecord>,
    /// Additional sources of employment history.
    #[serde(default)]
    pub external_sources: Vec<RecordSource>,
    /// The evaluation date; today when omitted.
    #[serde(default)]
    pub now: Option<NaiveDate>,
}

/// Query string carrying an optional reference date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsOfQuery {
    /// The reference date; today when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
