//! Event types for the hours report.
//!
//! [`ReportEvent`] is one concrete occurrence of a calendar event: a singular
//! event yields one, a recurring series yields one per occurrence. It is fully
//! built at construction time and never mutated afterwards.

use chrono::{Datelike, NaiveDateTime};

use crate::time::{EventTime, elapsed_hours};

/// A single occurrence counted in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEvent {
    /// The event title.
    pub summary: String,
    /// When the occurrence starts.
    pub start: EventTime,
    /// When the occurrence ends.
    pub end: EventTime,
    /// Hours between `start` and `end`.
    pub duration_hours: f64,
    /// Free-text description, empty if the event has none.
    pub description: String,
    /// Free-text location, empty if the event has none.
    pub location: String,
}

impl ReportEvent {
    /// Creates an event, computing its duration from `start` and `end`.
    pub fn new(summary: impl Into<String>, start: EventTime, end: EventTime) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
            duration_hours: elapsed_hours(&start, &end),
            description: String::new(),
            location: String::new(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Naive start used for ordering; all-day events sort at midnight.
    pub fn sort_key(&self) -> NaiveDateTime {
        self.start.naive()
    }

    /// Calendar year of the start.
    pub fn year(&self) -> i32 {
        self.start.date().year()
    }

    /// ISO 8601 week number of the start.
    pub fn iso_week(&self) -> u32 {
        self.start.date().iso_week().week()
    }
}
