//! Date range filtering.
//!
//! A [`DateRange`] has two optional bounds and works in one of two modes:
//!
//! - **Normal** (`start <= end`, or a single bound): keep events whose start
//!   date lies in `[start, end]`.
//! - **Inverted** (`end < start`): keep events whose start date lies outside
//!   that window, i.e. `date < end || date > start`.
//!
//! So `start=May 1, end=May 31` keeps May, and `start=May 31, end=May 1` keeps
//! everything except May. Only the start date of an event is compared.

use chrono::NaiveDate;

use crate::event::ReportEvent;

/// How a [`DateRange`] selects events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// No bound given; every event is kept.
    Unbounded,
    /// Keep events inside the inclusive window.
    Within,
    /// Keep events outside the window spanned by the swapped bounds.
    Outside,
}

/// An optional, possibly inverted, inclusive date window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Returns the selection mode implied by the bounds.
    pub fn mode(&self) -> RangeMode {
        match (self.start, self.end) {
            (None, None) => RangeMode::Unbounded,
            (Some(start), Some(end)) if end < start => RangeMode::Outside,
            _ => RangeMode::Within,
        }
    }

    /// Returns `true` if an event starting on `date` is kept.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.mode(), self.start, self.end) {
            (RangeMode::Outside, Some(start), Some(end)) => date < end || date > start,
            _ => {
                self.start.is_none_or(|start| date >= start)
                    && self.end.is_none_or(|end| date <= end)
            }
        }
    }

    /// Keeps the events whose start date this range selects, preserving order.
    pub fn apply(&self, events: Vec<ReportEvent>) -> Vec<ReportEvent> {
        if self.mode() == RangeMode::Unbounded {
            return events;
        }
        events
            .into_iter()
            .filter(|event| self.contains(event.start.date()))
            .collect()
    }
}
