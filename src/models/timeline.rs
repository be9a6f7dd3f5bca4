//! Assembled timeline models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ChangeEvent, DataQualityWarning};

/// All events on one date, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDay {
    /// The date.
    pub date: NaiveDate,
    /// The events on this date.
    pub events: Vec<ChangeEvent>,
}

/// The elapsed time between two dates, in calendar units.
///
/// # Example
///
/// ```
/// use cao_engine::models::TimelineSpan;
/// use chrono::NaiveDate;
///
/// let span = TimelineSpan::between(
///     NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
/// );
/// assert_eq!((span.years, span.months, span.days), (3, 2, 14));
/// assert_eq!(span.to_string(), "3 years, 2 months, 14 days");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSpan {
    /// The first date.
    pub start: NaiveDate,
    /// The last date.
    pub end: NaiveDate,
    /// Whole years.
    pub years: u32,
    /// Whole months beyond the years.
    pub months: u32,
    /// Days beyond the months.
    pub days: u32,
}

impl fmt::Display for TimelineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn unit(value: u32, singular: &str) -> String {
            if value == 1 {
                format!("1 {}", singular)
            } else {
                format!("{} {}s", value, singular)
            }
        }

        let mut parts = Vec::new();
        if self.years > 0 {
            parts.push(unit(self.years, "year"));
        }
        if self.months > 0 {
            parts.push(unit(self.months, "month"));
        }
        if self.days > 0 || parts.is_empty() {
            parts.push(unit(self.days, "day"));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Derived figures over the whole timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSummary {
    /// Number of contracts currently running.
    pub active_count: usize,
    /// Oldest contract start to latest end (or now); `None` without contracts.
    pub total_span: Option<TimelineSpan>,
    /// `total_span` rendered as text.
    pub total_span_text: Option<String>,
}

/// The merged, ordered, deduplicated change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Events grouped by date, newest first.
    pub days: Vec<TimelineDay>,
    /// Derived summary.
    pub summary: TimelineSummary,
    /// Data-quality findings collected while building the timeline.
    pub warnings: Vec<DataQualityWarning>,
}

impl Timeline {
    /// Iterates over all events in rendering order.
    pub fn events(&self) -> impl Iterator<Item = &ChangeEvent> {
        self.days.iter().flat_map(|day| day.events.iter())
    }
}
