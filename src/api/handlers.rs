//! HTTP request handlers for the CAO wage engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{EventSource, RecordSource, WageScaleDefinition};
use crate::resolution::{get_available_steps, project_progression, resolve_forward, resolve_reverse};
use crate::timeline::{CONTRACT_SOURCE, build_merged_timeline};

use super::request::{AsOfQuery, ForwardRequest, ReverseRequest, TimelineRequest};
use super::response::{ApiError, ApiErrorResponse, HealthResponse, StepsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/wages/forward", post(forward_handler))
        .route("/wages/reverse", post(reverse_handler))
        .route("/scales", get(scales_handler))
        .route("/scales/:scale/steps", get(steps_handler))
        .route(
            "/scales/:scale/steps/:step/progression",
            get(progression_handler),
        )
        .route("/timeline", post(timeline_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        category = ?err.category(),
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Turns a JSON body rejection into a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, e.g. the missing field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn invalid_request(correlation_id: Uuid, message: String) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %message,
        "Invalid request parameters"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(message)).into_response()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Handler for POST /wages/forward.
///
/// Returns the wage of a scale step in force on a date.
async fn forward_handler(
    State(state): State<AppState>,
    payload: Result<Json<ForwardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing forward lookup");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let snapshot = state.snapshot();
    match resolve_forward(&snapshot.table, request.scale, request.step, request.as_of) {
        Ok(resolved) => {
            info!(
                correlation_id = %correlation_id,
                scale = resolved.scale_number,
                step = resolved.step_number,
                effective_date = %resolved.effective_date,
                generation = snapshot.generation,
                "Forward lookup resolved"
            );
            json_ok(resolved)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /wages/reverse.
///
/// Returns the scale step that best explains an observed salary.
async fn reverse_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReverseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reverse lookup");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let snapshot = state.snapshot();
    let start_time = Instant::now();
    match resolve_reverse(
        &snapshot.table,
        &state.settings().matching,
        request.salary,
        request.as_of,
        request.basis,
        request.category_hint.as_deref(),
    ) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                scale = result.scale,
                nearest_step = ?result.nearest_step,
                exact = result.is_exact(),
                confidence = %result.confidence_score,
                duration_us = start_time.elapsed().as_micros(),
                "Reverse lookup completed"
            );
            json_ok(result)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /scales.
async fn scales_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshot();
    let scales: Vec<WageScaleDefinition> = snapshot.table.scales().cloned().collect();
    json_ok(scales)
}

/// Handler for GET /scales/{scale}/steps.
async fn steps_handler(
    State(state): State<AppState>,
    scale: Result<Path<u32>, PathRejection>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Path(scale) = match scale {
        Ok(path) => path,
        Err(rejection) => return invalid_request(correlation_id, rejection.body_text()),
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return invalid_request(correlation_id, rejection.body_text()),
    };
    let as_of = query.as_of.unwrap_or_else(today);

    let snapshot = state.snapshot();
    match get_available_steps(&snapshot.table, scale, as_of) {
        Ok(steps) => json_ok(StepsResponse {
            scale,
            as_of,
            steps,
        }),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /scales/{scale}/steps/{step}/progression.
///
/// Returns the step's wage history with the current and next scheduled wage.
async fn progression_handler(
    State(state): State<AppState>,
    path: Result<Path<(u32, u32)>, PathRejection>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Path((scale, step)) = match path {
        Ok(path) => path,
        Err(rejection) => return invalid_request(correlation_id, rejection.body_text()),
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return invalid_request(correlation_id, rejection.body_text()),
    };
    let as_of = query.as_of.unwrap_or_else(today);

    let snapshot = state.snapshot();
    match project_progression(&snapshot.table, scale, step, as_of) {
        Ok(projection) => {
            info!(
                correlation_id = %correlation_id,
                scale,
                step,
                points = projection.points.len(),
                has_next = projection.next_scheduled.is_some(),
                "Progression projected"
            );
            json_ok(projection)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /timeline.
///
/// Builds the merged employment timeline of the supplied records.
async fn timeline_handler(payload: Result<Json<TimelineRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timeline request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let now = request.now.unwrap_or_else(today);
    let mut sources = Vec::with_capacity(1 + request.external_sources.len());
    sources.push(RecordSource {
        source: EventSource::authoritative(CONTRACT_SOURCE),
        records: request.records,
    });
    sources.extend(request.external_sources);

    let start_time = Instant::now();
    let timeline = build_merged_timeline(&sources, now);
    info!(
        correlation_id = %correlation_id,
        sources = sources.len(),
        days = timeline.days.len(),
        warnings = timeline.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Timeline built"
    );
    json_ok(timeline)
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshot();
    json_ok(HealthResponse {
        status: "ok".to_string(),
        table_generation: snapshot.generation,
        agreement_version: snapshot.table.metadata().version.clone(),
    })
}
