//! Wage Scale Engine for Dutch Collective Labour Agreements (CAO)
//!
//! This crate resolves CAO wage scales: the wage of a scale step on a date,
//! the scale step that best explains an observed salary, and the scheduled
//! progression of a step. It also normalizes raw employment records into
//! change events and assembles them into an auditable timeline.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod resolution;
pub mod timeline;
