//! Normalized change events and the warnings raised while building them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ContractType;

/// The kind of change an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeEventType {
    /// A contract begins.
    ContractStart,
    /// A contract ends.
    ContractEnd,
    /// A new salary takes effect.
    SalaryChange,
    /// A new working-hours arrangement takes effect.
    HoursChange,
    /// The employee is placed in a different scale or step.
    ScaleChange,
}

impl ChangeEventType {
    /// Rendering precedence within a single date; lower sorts first.
    pub fn precedence(self) -> u8 {
        match self {
            ChangeEventType::ContractStart => 0,
            ChangeEventType::ContractEnd => 1,
            ChangeEventType::SalaryChange => 2,
            ChangeEventType::HoursChange => 3,
            ChangeEventType::ScaleChange => 4,
        }
    }
}

/// The state captured before or after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventValue {
    /// Contract terms.
    Contract {
        /// Permanent or fixed-term.
        contract_type: ContractType,
        /// First day of the contract.
        start_date: NaiveDate,
        /// Last day of the contract, if any.
        end_date: Option<NaiveDate>,
        /// The employer's name, if known.
        employer: Option<String>,
        /// The job title, if known.
        job_title: Option<String>,
    },
    /// Salary figures.
    Salary {
        /// Gross hourly wage, if known.
        hourly_wage: Option<Decimal>,
        /// Gross monthly wage, if known.
        monthly_wage: Option<Decimal>,
        /// Gross yearly wage, if known.
        yearly_wage: Option<Decimal>,
        /// Reason given by the source, if any.
        reason: Option<String>,
    },
    /// Working-hours arrangement.
    Hours {
        /// Contracted hours per week, if known.
        hours_per_week: Option<Decimal>,
        /// Contracted days per week, if known.
        days_per_week: Option<Decimal>,
        /// Part-time factor, if known.
        parttime_factor: Option<Decimal>,
        /// Employee type label, if known.
        employee_type: Option<String>,
    },
    /// Scale placement.
    Scale {
        /// The scale number.
        scale_number: u32,
        /// The step number, if known.
        step_number: Option<u32>,
    },
}

/// Where a batch of events came from.
///
/// # Example
///
/// ```
/// use cao_engine::models::EventSource;
///
/// let source = EventSource::authoritative("payroll");
/// assert!(source.authoritative);
/// assert_eq!(EventSource::external("upload").name, "upload");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSource {
    /// A short name identifying the source.
    pub name: String,
    /// Whether this source wins when two sources disagree.
    #[serde(default)]
    pub authoritative: bool,
}

impl EventSource {
    /// Creates a source whose events win deduplication conflicts.
    pub fn authoritative(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authoritative: true,
        }
    }

    /// Creates a non-authoritative source.
    pub fn external(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authoritative: false,
        }
    }
}

/// A single dated change in a person's employment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The contract this event belongs to.
    pub entity_id: String,
    /// Name of the source that produced the event.
    pub source: String,
    /// Whether the source is authoritative.
    pub authoritative: bool,
    /// The date the change takes effect.
    pub date: NaiveDate,
    /// What kind of change this is.
    pub event_type: ChangeEventType,
    /// The state before the change; `None` for a first occurrence.
    pub previous_value: Option<EventValue>,
    /// The state after the change.
    pub current_value: EventValue,
    /// Relative change against the previous value, in percent.
    pub percent_change: Option<Decimal>,
    /// Whether this event describes the state in force now.
    pub is_current: bool,
    /// Set when the event was built from incomplete or inconsistent data.
    #[serde(default)]
    pub low_confidence: bool,
}

impl ChangeEvent {
    /// The key events are deduplicated on.
    pub fn dedup_key(&self) -> (String, ChangeEventType, NaiveDate) {
        (self.entity_id.clone(), self.event_type, self.date)
    }
}

/// Identifies the kind of data-quality problem found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// An optional field needed for a derived value was missing.
    MissingField,
    /// An entry had no start date and was placed at the contract start.
    MissingStartDate,
    /// The contract ends before it starts.
    InvalidContractDates,
    /// Several entries were flagged active at once.
    MultipleActiveEntries,
    /// Two sources reported the same change with different values.
    ConflictingEvent,
    /// Two sources reported the same change with identical values.
    DuplicateEvent,
    /// Several events of one kind were current after merging.
    MultipleCurrentEvents,
}

/// How much attention a warning deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational.
    Low,
    /// The output is usable but some values are uncertain.
    Medium,
    /// The output disagrees between sources.
    High,
}

/// A non-fatal data-quality finding attached to successful output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    /// The kind of problem.
    pub code: WarningCode,
    /// A human-readable description.
    pub message: String,
    /// The contract the warning concerns, if any.
    pub entity_id: Option<String>,
    /// The date the warning concerns, if any.
    pub date: Option<NaiveDate>,
    /// How serious the problem is.
    pub severity: WarningSeverity,
}

impl DataQualityWarning {
    /// Creates a warning about one contract.
    pub fn new(
        code: WarningCode,
        severity: WarningSeverity,
        entity_id: impl Into<String>,
        date: Option<NaiveDate>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            entity_id: Some(entity_id.into()),
            date,
            severity,
        }
    }
}
