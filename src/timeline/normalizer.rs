//! Conversion of raw employment records into typed change events.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    ChangeEvent, ChangeEventType, DataQualityWarning, EmploymentRecord, EventSource, EventValue,
    HoursEntry, SalaryEntry, WarningCode, WarningSeverity,
};
use crate::resolution::percent_change;

/// The events and warnings derived from one employment record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Change events in chronological order per kind.
    pub events: Vec<ChangeEvent>,
    /// Data-quality findings.
    pub warnings: Vec<DataQualityWarning>,
}

/// A history entry with an optional start date and active marker.
trait HistoryEntry {
    fn start_date(&self) -> Option<NaiveDate>;
    fn is_active(&self) -> Option<bool>;
}

impl HistoryEntry for SalaryEntry {
    fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn is_active(&self) -> Option<bool> {
        self.is_active
    }
}

impl HistoryEntry for HoursEntry {
    fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn is_active(&self) -> Option<bool> {
        self.is_active
    }
}

/// An entry together with the date it was placed at.
struct Placed<'a, T> {
    date: NaiveDate,
    low_confidence: bool,
    entry: &'a T,
}

/// Converts one employment record into change events.
///
/// Emits a `contract_start` event, a `contract_end` event when the record has
/// an end date, one `salary_change` per salary entry, one `hours_change` per
/// hours entry and a `scale_change` whenever a salary entry moves the
/// employee to a different scale or step. Missing optional values stay
/// unknown; they are never read as zero.
///
/// Salary and hours entries are processed oldest first. Each entry after the
/// first carries the previous entry as `previous_value` and the percent
/// change of the hourly wage (salary) or weekly hours (hours) when both
/// figures are known.
///
/// # Example
///
/// ```
/// use cao_engine::models::{EmploymentRecord, EventSource};
/// use cao_engine::timeline::normalize_record;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record: EmploymentRecord = serde_json::from_str(r#"{
///     "id": "contract_001",
///     "start_date": "2023-01-01",
///     "salary_entries": [
///         { "start_date": "2023-01-01", "hourly_wage": "20.00" },
///         { "start_date": "2024-01-01", "hourly_wage": "22.00" }
///     ]
/// }"#).unwrap();
/// let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// let normalized = normalize_record(&record, &EventSource::authoritative("hr"), now);
///
/// let raise = normalized.events.last().unwrap();
/// assert_eq!(raise.percent_change, Some(Decimal::from(10)));
/// assert!(raise.is_current);
/// ```
pub fn normalize_record(
    record: &EmploymentRecord,
    source: &EventSource,
    now: NaiveDate,
) -> NormalizedRecord {
    let mut normalizer = Normalizer {
        record,
        source,
        now,
        output: NormalizedRecord::default(),
    };
    normalizer.contract_events();
    normalizer.salary_events();
    normalizer.hours_events();
    normalizer.output
}

struct Normalizer<'a> {
    record: &'a EmploymentRecord,
    source: &'a EventSource,
    now: NaiveDate,
    output: NormalizedRecord,
}

impl<'a> Normalizer<'a> {
    fn event(
        &self,
        date: NaiveDate,
        event_type: ChangeEventType,
        current_value: EventValue,
    ) -> ChangeEvent {
        ChangeEvent {
            entity_id: self.record.id.clone(),
            source: self.source.name.clone(),
            authoritative: self.source.authoritative,
            date,
            event_type,
            previous_value: None,
            current_value,
            percent_change: None,
            is_current: false,
            low_confidence: false,
        }
    }

    fn warn(
        &mut self,
        code: WarningCode,
        severity: WarningSeverity,
        date: Option<NaiveDate>,
        message: String,
    ) {
        self.output.warnings.push(DataQualityWarning::new(
            code,
            severity,
            self.record.id.clone(),
            date,
            message,
        ));
    }

    fn contract_events(&mut self) {
        let record = self.record;
        let inverted = record.end_date.is_some_and(|end| end < record.start_date);
        if let Some(end) = record.end_date.filter(|_| inverted) {
            self.warn(
                WarningCode::InvalidContractDates,
                WarningSeverity::Medium,
                Some(end),
                format!(
                    "Contract ends on {} before it starts on {}",
                    end, record.start_date
                ),
            );
        }

        let value = EventValue::Contract {
            contract_type: record.contract_type(),
            start_date: record.start_date,
            end_date: record.end_date,
            employer: record.employer.clone(),
            job_title: record.job_title.clone(),
        };

        if let Some(end) = record.end_date {
            let start = ChangeEvent {
                is_current: record.is_running(self.now),
                low_confidence: inverted,
                ..self.event(record.start_date, ChangeEventType::ContractStart, value.clone())
            };
            let end = ChangeEvent {
                low_confidence: inverted,
                ..self.event(end, ChangeEventType::ContractEnd, value)
            };
            self.output.events.extend([start, end]);
        } else {
            let start = ChangeEvent {
                is_current: record.is_running(self.now),
                ..self.event(record.start_date, ChangeEventType::ContractStart, value)
            };
            self.output.events.push(start);
        }
    }

    /// Dates every entry, falling back to the contract start, and sorts them
    /// oldest first. Entries sharing a date keep their input order.
    fn place<T: HistoryEntry>(&mut self, entries: &'a [T], kind: &str) -> Vec<Placed<'a, T>> {
        let mut placed = Vec::with_capacity(entries.len());
        for entry in entries {
            let placed_entry = match entry.start_date() {
                Some(date) => Placed {
                    date,
                    low_confidence: false,
                    entry,
                },
                None => {
                    let date = self.record.start_date;
                    self.warn(
                        WarningCode::MissingStartDate,
                        WarningSeverity::Medium,
                        Some(date),
                        format!("{} entry has no start date; placed at contract start", kind),
                    );
                    Placed {
                        date,
                        low_confidence: true,
                        entry,
                    }
                }
            };
            placed.push(placed_entry);
        }
        placed.sort_by_key(|p| p.date);
        placed
    }

    /// Picks the entry in force now.
    ///
    /// An explicit `is_active` flag wins, the latest flagged entry when
    /// several are flagged. Without flags the last entry that has started is
    /// current, unless the contract is no longer running.
    fn current_index<T: HistoryEntry>(
        &mut self,
        placed: &[Placed<'_, T>],
        kind: &str,
    ) -> Option<usize> {
        let flagged: Vec<usize> = placed
            .iter()
            .enumerate()
            .filter(|(_, p)| p.entry.is_active() == Some(true))
            .map(|(index, _)| index)
            .collect();

        if flagged.len() > 1 {
            self.warn(
                WarningCode::MultipleActiveEntries,
                WarningSeverity::Medium,
                None,
                format!(
                    "{} {} entries are flagged active; using the latest",
                    flagged.len(),
                    kind
                ),
            );
        }
        if let Some(&latest) = flagged.last() {
            return Some(latest);
        }

        if !self.record.is_running(self.now) {
            return None;
        }
        placed
            .iter()
            .rposition(|p| p.date <= self.now && p.entry.is_active() != Some(false))
    }

    /// Percent change between two optional figures, warning when a figure
    /// needed for it is missing.
    fn change_between(
        &mut self,
        previous: Option<Decimal>,
        current: Option<Decimal>,
        date: NaiveDate,
        field: &str,
    ) -> Option<Decimal> {
        match (previous, current) {
            (Some(previous), Some(current)) => percent_change(previous, current),
            _ => {
                self.warn(
                    WarningCode::MissingField,
                    WarningSeverity::Low,
                    Some(date),
                    format!("{} is missing; percent change is unknown", field),
                );
                None
            }
        }
    }

    fn salary_events(&mut self) {
        let record = self.record;
        let placed = self.place(&record.salary_entries, "Salary");
        let current = self.current_index(&placed, "salary");

        let mut placement: Option<(u32, Option<u32>)> = None;
        // (event index, salary entry index) of every scale change
        let mut scale_events = Vec::new();

        for (index, item) in placed.iter().enumerate() {
            let previous = index.checked_sub(1).map(|i| &placed[i]);
            let percent = match previous {
                Some(previous) => self.change_between(
                    previous.entry.hourly_wage,
                    item.entry.hourly_wage,
                    item.date,
                    "Hourly wage",
                ),
                None => None,
            };

            let event = ChangeEvent {
                previous_value: previous.map(|p| salary_value(p.entry)),
                percent_change: percent,
                is_current: current == Some(index),
                low_confidence: item.low_confidence,
                ..self.event(
                    item.date,
                    ChangeEventType::SalaryChange,
                    salary_value(item.entry),
                )
            };
            self.output.events.push(event);

            if let Some(scale_number) = item.entry.scale_number {
                let next = (scale_number, item.entry.step_number);
                if placement != Some(next) {
                    let event = ChangeEvent {
                        previous_value: placement.map(|(scale_number, step_number)| {
                            EventValue::Scale {
                                scale_number,
                                step_number,
                            }
                        }),
                        low_confidence: item.low_confidence,
                        ..self.event(
                            item.date,
                            ChangeEventType::ScaleChange,
                            EventValue::Scale {
                                scale_number,
                                step_number: item.entry.step_number,
                            },
                        )
                    };
                    scale_events.push((self.output.events.len(), index));
                    self.output.events.push(event);
                    placement = Some(next);
                }
            }
        }

        // The placement in force is the last one set at or before the
        // current salary entry.
        if let Some(current) = current {
            if let Some(&(event_index, _)) = scale_events
                .iter()
                .rev()
                .find(|(_, entry_index)| *entry_index <= current)
            {
                self.output.events[event_index].is_current = true;
            }
        }
    }

    fn hours_events(&mut self) {
        let record = self.record;
        let placed = self.place(&record.hours_entries, "Hours");
        let current = self.current_index(&placed, "hours");

        for (index, item) in placed.iter().enumerate() {
            let previous = index.checked_sub(1).map(|i| &placed[i]);
            let percent = match previous {
                Some(previous) => self.change_between(
                    previous.entry.hours_per_week,
                    item.entry.hours_per_week,
                    item.date,
                    "Hours per week",
                ),
                None => None,
            };

            let event = ChangeEvent {
                previous_value: previous.map(|p| hours_value(p.entry)),
                percent_change: percent,
                is_current: current == Some(index),
                low_confidence: item.low_confidence,
                ..self.event(
                    item.date,
                    ChangeEventType::HoursChange,
                    hours_value(item.entry),
                )
            };
            self.output.events.push(event);
        }
    }
}

fn salary_value(entry: &SalaryEntry) -> EventValue {
    EventValue::Salary {
        hourly_wage: entry.hourly_wage,
        monthly_wage: entry.monthly_wage,
        yearly_wage: entry.yearly_wage,
        reason: entry.reason.clone(),
    }
}

fn hours_value(entry: &HoursEntry) -> EventValue {
    EventValue::Hours {
        hours_per_week: entry.hours_per_week,
        days_per_week: entry.days_per_week,
        parttime_factor: entry.parttime_factor,
        employee_type: entry.employee_type.clone(),
    }
}
