//! HTTP API module for the CAO wage engine.
//!
//! This module exposes forward and reverse wage lookups, scale and step
//! listings, progression projections and timeline assembly as JSON
//! endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AsOfQuery, ForwardRequest, ReverseRequest, TimelineRequest};
pub use response::{ApiError, ApiErrorResponse, HealthResponse, StepsResponse};
pub use state::AppState;
