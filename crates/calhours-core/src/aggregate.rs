//! Yearly aggregation.
//!
//! Events are sorted by their naive start, then grouped by calendar year and
//! tagged with their ISO week number. Buckets come out in ascending year
//! order and each keeps the global chronological order.

use std::collections::BTreeMap;

use crate::event::ReportEvent;

/// One ISO-week-tagged event inside a [`YearBucket`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeekEntry {
    /// ISO 8601 week number of the event start.
    pub week: u32,
    pub event: ReportEvent,
}

/// All events of one calendar year, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearBucket {
    pub year: i32,
    pub entries: Vec<WeekEntry>,
}

impl YearBucket {
    /// Number of events in the bucket.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bucket holds no events.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the hours of every event in the bucket.
    pub fn total_hours(&self) -> f64 {
        self.entries.iter().map(|e| e.event.duration_hours).sum()
    }
}

/// Sorts `events` chronologically (stable) in place.
///
/// All-day events sort at midnight of their date.
pub fn sort_chronologically(events: &mut [ReportEvent]) {
    events.sort_by_key(ReportEvent::sort_key);
}

/// Sorts `events` and groups them into year buckets.
pub fn aggregate(mut events: Vec<ReportEvent>) -> Vec<YearBucket> {
    sort_chronologically(&mut events);

    let mut years: BTreeMap<i32, Vec<WeekEntry>> = BTreeMap::new();
    for event in events {
        years.entry(event.year()).or_default().push(WeekEntry {
            week: event.iso_week(),
            event,
        });
    }

    years
        .into_iter()
        .map(|(year, entries)| YearBucket { year, entries })
        .collect()
}
