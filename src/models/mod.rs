//! Core data models for the CAO wage engine.
//!
//! This module contains all the domain models used throughout the engine.

mod change_event;
mod detection;
mod employment;
mod progression;
mod timeline;
mod wage;

pub use change_event::{
    ChangeEvent, ChangeEventType, DataQualityWarning, EventSource, EventValue, WarningCode,
    WarningSeverity,
};
pub use detection::{CandidateMatch, ComplianceStatus, ConfidenceTier, DetectionResult};
pub use employment::{ContractType, EmploymentRecord, HoursEntry, RecordSource, SalaryEntry};
pub use progression::{ProgressionPoint, ProjectedProgression, StepWage};
pub use timeline::{Timeline, TimelineDay, TimelineSpan, TimelineSummary};
pub use wage::{ResolvedWage, SalaryBasis, WageAmounts, WageRate, WageScaleDefinition};
