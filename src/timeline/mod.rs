//! Employment timeline construction.
//!
//! [`normalize_record`] turns one raw employment record into typed change
//! events; [`assemble_timeline`] merges the events of one or more sources
//! into a deduplicated history grouped by date, newest first.

mod assembler;
mod normalizer;
mod span;

pub use assembler::{CONTRACT_SOURCE, assemble_timeline, build_merged_timeline, build_timeline};
pub use normalizer::{NormalizedRecord, normalize_record};
