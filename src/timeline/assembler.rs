//! Merging normalized events into an ordered, deduplicated timeline.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    ChangeEvent, ChangeEventType, DataQualityWarning, EmploymentRecord, EventSource,
    RecordSource, Timeline, TimelineDay, TimelineSpan, TimelineSummary, WarningCode,
    WarningSeverity,
};

use super::normalizer::normalize_record;

/// Source name given to records passed to [`build_timeline`].
pub const CONTRACT_SOURCE: &str = "contracts";

/// Normalizes the records of a single authoritative source and assembles
/// their timeline.
pub fn build_timeline(records: &[EmploymentRecord], now: NaiveDate) -> Timeline {
    build_merged_timeline(
        &[RecordSource {
            source: EventSource::authoritative(CONTRACT_SOURCE),
            records: records.to_vec(),
        }],
        now,
    )
}

/// Normalizes the records of every source and assembles one timeline.
///
/// Sources are merged in the order given; when two sources report the same
/// change, an authoritative source beats a non-authoritative one and
/// otherwise the earlier source wins.
pub fn build_merged_timeline(sources: &[RecordSource], now: NaiveDate) -> Timeline {
    let mut events = Vec::new();
    let mut warnings = Vec::new();

    for source in sources {
        for record in &source.records {
            let normalized = normalize_record(record, &source.source, now);
            events.extend(normalized.events);
            warnings.extend(normalized.warnings);
        }
    }

    assemble_timeline(events, warnings, now)
}

/// Assembles events from one or more normalizer runs into a timeline.
///
/// Events are deduplicated on (entity, type, date), at most one event per
/// (entity, type) is left current, and the survivors are grouped by date,
/// newest first. Within a date events follow the type precedence, then the
/// entity id, then input order.
///
/// `warnings` are carried into the result ahead of the warnings raised here.
pub fn assemble_timeline(
    events: Vec<ChangeEvent>,
    warnings: Vec<DataQualityWarning>,
    now: NaiveDate,
) -> Timeline {
    let input_count = events.len();
    let mut warnings = warnings;

    let mut events = deduplicate(events, &mut warnings);
    enforce_single_current(&mut events, &mut warnings);

    let summary = summarize(&events, now);

    events.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.event_type.precedence().cmp(&b.event_type.precedence()))
            .then_with(|| a.entity_id.cmp(&b.entity_id))
    });

    let mut days: Vec<TimelineDay> = Vec::new();
    for event in events {
        match days.last_mut() {
            Some(day) if day.date == event.date => day.events.push(event),
            _ => days.push(TimelineDay {
                date: event.date,
                events: vec![event],
            }),
        }
    }

    debug!(
        input_events = input_count,
        days = days.len(),
        warnings = warnings.len(),
        active = summary.active_count,
        "Assembled timeline"
    );

    Timeline {
        days,
        summary,
        warnings,
    }
}

/// Keeps one event per (entity, type, date).
fn deduplicate(
    events: Vec<ChangeEvent>,
    warnings: &mut Vec<DataQualityWarning>,
) -> Vec<ChangeEvent> {
    let mut kept: Vec<ChangeEvent> = Vec::with_capacity(events.len());
    let mut index: HashMap<(String, ChangeEventType, NaiveDate), usize> = HashMap::new();

    for event in events {
        let key = event.dedup_key();
        let Some(&position) = index.get(&key) else {
            index.insert(key, kept.len());
            kept.push(event);
            continue;
        };

        let existing = &mut kept[position];
        let dropped = if event.authoritative && !existing.authoritative {
            std::mem::replace(existing, event)
        } else {
            event
        };
        // The survivor stands in for the dropped event's current state.
        existing.is_current |= dropped.is_current;
        warnings.push(duplicate_warning(existing, &dropped));
    }

    kept
}

fn duplicate_warning(kept: &ChangeEvent, dropped: &ChangeEvent) -> DataQualityWarning {
    let (code, severity, verb) = if kept.current_value == dropped.current_value {
        (WarningCode::DuplicateEvent, WarningSeverity::Low, "duplicates")
    } else {
        (
            WarningCode::ConflictingEvent,
            WarningSeverity::High,
            "conflicts with",
        )
    };
    DataQualityWarning::new(
        code,
        severity,
        kept.entity_id.clone(),
        Some(kept.date),
        format!(
            "{:?} from {} {} {}; keeping {}",
            kept.event_type, dropped.source, verb, kept.source, kept.source
        ),
    )
}

/// Leaves only the latest-dated current event of each (entity, type)
/// current.
fn enforce_single_current(events: &mut [ChangeEvent], warnings: &mut Vec<DataQualityWarning>) {
    let mut current: BTreeMap<(String, ChangeEventType), Vec<usize>> = BTreeMap::new();
    for (position, event) in events.iter().enumerate() {
        if event.is_current {
            current
                .entry((event.entity_id.clone(), event.event_type))
                .or_default()
                .push(position);
        }
    }

    for ((entity_id, event_type), positions) in current {
        if positions.len() < 2 {
            continue;
        }
        // Ties keep the earliest input.
        let mut keep = positions[0];
        for &position in &positions[1..] {
            if events[position].date > events[keep].date {
                keep = position;
            }
        }
        for &position in &positions {
            events[position].is_current = position == keep;
        }
        warnings.push(DataQualityWarning::new(
            WarningCode::MultipleCurrentEvents,
            WarningSeverity::Medium,
            entity_id,
            Some(events[keep].date),
            format!(
                "{} {:?} events were current; keeping the latest",
                positions.len(),
                event_type
            ),
        ));
    }
}

fn summarize(events: &[ChangeEvent], now: NaiveDate) -> TimelineSummary {
    let starts: Vec<&ChangeEvent> = events
        .iter()
        .filter(|e| e.event_type == ChangeEventType::ContractStart)
        .collect();

    let active_count = starts.iter().filter(|e| e.is_current).count();

    let Some(first_start) = starts.iter().map(|e| e.date).min() else {
        return TimelineSummary {
            active_count,
            total_span: None,
            total_span_text: None,
        };
    };

    // Without a current contract the span stops at the latest end date, or
    // at the latest recorded change when no contract has an end.
    let last_end = if active_count > 0 {
        now
    } else {
        events
            .iter()
            .filter(|e| e.event_type == ChangeEventType::ContractEnd)
            .map(|e| e.date)
            .max()
            .or_else(|| events.iter().map(|e| e.date).max())
            .unwrap_or(first_start)
    };

    let span = TimelineSpan::between(first_start, last_end);
    TimelineSummary {
        active_count,
        total_span_text: Some(span.to_string()),
        total_span: Some(span),
    }
}
