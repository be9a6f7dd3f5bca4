//! Calendar span arithmetic for the timeline summary.

use chrono::{Datelike, Months, NaiveDate};

use crate::models::TimelineSpan;

impl TimelineSpan {
    /// Measures the span from `start` to `end` in whole years, months and
    /// remaining days. An `end` before `start` yields an empty span.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let end = end.max(start);

        let month_delta =
            (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
        let mut months = u32::try_from(month_delta).unwrap_or(0);

        // Adding whole months may overshoot `end` when its day of month is
        // earlier than the start's; step back until it fits.
        let anchor = loop {
            match start.checked_add_months(Months::new(months)) {
                Some(anchor) if anchor <= end => break anchor,
                _ if months == 0 => break start,
                _ => months -= 1,
            }
        };
        let days = u32::try_from((end - anchor).num_days()).unwrap_or(0);

        Self {
            start,
            end,
            years: months / 12,
            months: months % 12,
            days,
        }
    }
}
