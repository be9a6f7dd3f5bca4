//! Error types for the CAO wage engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during wage resolution and
//! configuration loading. Non-fatal data-quality problems are not errors;
//! they travel alongside successful output as
//! [`DataQualityWarning`](crate::models::DataQualityWarning) values.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// The broad class an [`EngineError`] belongs to.
///
/// Input and range errors are terminal for the call that raised them.
/// Configuration errors surface while loading or refreshing reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or out-of-domain arguments.
    Input,
    /// The requested date predates the known wage data.
    Range,
    /// The reference data could not be loaded or is inconsistent.
    Config,
}

/// The main error type for the CAO wage engine.
///
/// # Example
///
/// ```
/// use cao_engine::error::{EngineError, ErrorCategory};
///
/// let error = EngineError::ScaleNotFound { scale: 42 };
/// assert_eq!(error.to_string(), "Wage scale not found: 42");
/// assert_eq!(error.category(), ErrorCategory::Input);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The loaded reference data violates a table invariant.
    #[error("Invalid wage table: {message}")]
    InvalidTable {
        /// A description of the violated invariant.
        message: String,
    },

    /// The scale number is not defined in the wage table.
    #[error("Wage scale not found: {scale}")]
    ScaleNotFound {
        /// The unknown scale number.
        scale: u32,
    },

    /// The step is outside the scale's range or has no wage rows.
    #[error("Step {step} not found in scale {scale}")]
    StepNotFound {
        /// The scale number.
        scale: u32,
        /// The unknown step number.
        step: u32,
    },

    /// The requested date precedes the earliest known rate.
    #[error(
        "No wage for scale {scale} step {step} on {date}: earliest known rate is effective {earliest}"
    )]
    OutOfRange {
        /// The scale number.
        scale: u32,
        /// The step number.
        step: u32,
        /// The requested date.
        date: NaiveDate,
        /// The earliest effective date on record for this scale and step.
        earliest: NaiveDate,
    },

    /// No wage rate at all is effective on the requested date.
    #[error("No wage rates are effective on {date}")]
    NoCandidates {
        /// The requested date.
        date: NaiveDate,
    },

    /// The salary given for a reverse lookup cannot be matched.
    #[error("Ambiguous input salary {salary}: {message}")]
    AmbiguousInput {
        /// The rejected salary.
        salary: Decimal,
        /// Why the salary was rejected.
        message: String,
    },
}

impl EngineError {
    /// Returns the taxonomy class of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidTable { .. } => ErrorCategory::Config,
            EngineError::OutOfRange { .. } | EngineError::NoCandidates { .. } => {
                ErrorCategory::Range
            }
            EngineError::ScaleNotFound { .. }
            | EngineError::StepNotFound { .. }
            | EngineError::AmbiguousInput { .. } => ErrorCategory::Input,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
