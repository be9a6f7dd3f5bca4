//! Response types for the CAO wage engine API.
//!
//! This module defines the success bodies that have no model of their own,
//! the JSON error body, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorCategory};

/// Response body for `GET /scales/{scale}/steps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsResponse {
    /// The scale queried.
    pub scale: u32,
    /// The reference date.
    pub as_of: NaiveDate,
    /// Steps with a wage in force on `as_of`, ascending.
    pub steps: Vec<u32>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server answers.
    pub status: String,
    /// Generation of the wage table snapshot in use.
    pub table_generation: u64,
    /// Version of the agreement the table describes.
    pub agreement_version: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        // Unknown scales and steps are missing resources.
        let status = match &error {
            EngineError::ScaleNotFound { .. } | EngineError::StepNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            other => status_for(other.category()),
        };
        let message = error.to_string();
        let error = match error {
            EngineError::ScaleNotFound { .. } => ApiError::with_details(
                "SCALE_NOT_FOUND",
                message,
                "The scale is not defined in the loaded wage table",
            ),
            EngineError::StepNotFound { .. } => ApiError::with_details(
                "STEP_NOT_FOUND",
                message,
                "The step lies outside the scale or has no wage rates",
            ),
            EngineError::AmbiguousInput { .. } => ApiError::new("AMBIGUOUS_INPUT", message),
            EngineError::OutOfRange { .. } => ApiError::with_details(
                "OUT_OF_RANGE",
                message,
                "The requested date precedes the wage data on record",
            ),
            EngineError::NoCandidates { .. } => ApiError::new("NO_CANDIDATES", message),
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidTable { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message)
            }
        };
        ApiErrorResponse { status, error }
    }
}

/// Maps an error category to its HTTP status.
fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Input => StatusCode::BAD_REQUEST,
        ErrorCategory::Range => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
