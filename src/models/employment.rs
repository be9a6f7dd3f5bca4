//! Raw employment records as supplied by the system of record.
//!
//! Fields the source may omit are modelled as `Option` and stay missing
//! until the normalizer decides how to treat them; nothing here defaults a
//! missing number to zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EventSource;

/// Whether a contract is open-ended or has an agreed end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// No end date (vast contract).
    Permanent,
    /// An end date is set (tijdelijk contract).
    FixedTerm,
}

/// A salary figure valid from a given date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryEntry {
    /// The date this salary takes effect.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Gross hourly wage.
    #[serde(default)]
    pub hourly_wage: Option<Decimal>,
    /// Gross monthly wage.
    #[serde(default)]
    pub monthly_wage: Option<Decimal>,
    /// Gross yearly wage.
    #[serde(default)]
    pub yearly_wage: Option<Decimal>,
    /// Free-text reason for the change (e.g. "periodiek", "CAO-verhoging").
    #[serde(default)]
    pub reason: Option<String>,
    /// The CAO scale the employee is placed in.
    #[serde(default)]
    pub scale_number: Option<u32>,
    /// The step within the scale.
    #[serde(default)]
    pub step_number: Option<u32>,
    /// Source-side marker for the salary currently in force.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A working-hours arrangement valid from a given date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    /// The date this arrangement takes effect.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Contracted hours per week.
    #[serde(default)]
    pub hours_per_week: Option<Decimal>,
    /// Contracted days per week.
    #[serde(default)]
    pub days_per_week: Option<Decimal>,
    /// Part-time factor relative to a full-time week (1.0 = full time).
    #[serde(default)]
    pub parttime_factor: Option<Decimal>,
    /// Employee type label from the source system.
    #[serde(default)]
    pub employee_type: Option<String>,
    /// Source-side marker for the arrangement currently in force.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// One contract of one person, with its salary and hours history.
///
/// # Example
///
/// ```
/// use cao_engine::models::{ContractType, EmploymentRecord};
///
/// let record: EmploymentRecord = serde_json::from_str(r#"{
///     "id": "contract_001",
///     "start_date": "2023-02-01",
///     "salary_entries": [{ "start_date": "2023-02-01", "hourly_wage": "18.40" }]
/// }"#).unwrap();
///
/// assert_eq!(record.contract_type(), ContractType::Permanent);
/// assert!(record.hours_entries.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    /// Identifier of the contract; timeline entities are keyed on it.
    pub id: String,
    /// The employer's name.
    #[serde(default)]
    pub employer: Option<String>,
    /// The job title on the contract.
    #[serde(default)]
    pub job_title: Option<String>,
    /// First day of the contract.
    pub start_date: NaiveDate,
    /// Last day of the contract; `None` means open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Salary history.
    #[serde(default)]
    pub salary_entries: Vec<SalaryEntry>,
    /// Working-hours history.
    #[serde(default)]
    pub hours_entries: Vec<HoursEntry>,
    /// Source-side marker for a contract that is currently running.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl EmploymentRecord {
    /// Returns the contract type implied by the end date.
    pub fn contract_type(&self) -> ContractType {
        match self.end_date {
            Some(_) => ContractType::FixedTerm,
            None => ContractType::Permanent,
        }
    }

    /// Returns true if the contract is running on `now`.
    ///
    /// An explicit `is_active` flag wins; otherwise the contract dates decide.
    pub fn is_running(&self, now: NaiveDate) -> bool {
        match self.is_active {
            Some(flag) => flag,
            None => self.start_date <= now && self.end_date.is_none_or(|end| end >= now),
        }
    }
}

/// The employment records supplied by one source.
///
/// Serialized flat: `{"name": .., "authoritative": .., "records": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSource {
    /// The source the records came from.
    #[serde(flatten)]
    pub source: EventSource,
    /// The records.
    #[serde(default)]
    pub records: Vec<EmploymentRecord>,
}
