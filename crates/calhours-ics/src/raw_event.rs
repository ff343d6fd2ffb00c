//! Raw event component type.
//!
//! This module defines [`RawComponent`], the fields of one VEVENT as they come
//! out of the ICS file, before the admission filter and normalization.
//!
//! The raw component keeps everything the report needs and nothing else. It
//! is converted into one or more [`calhours_core::ReportEvent`]s by
//! [`crate::normalize`].

use calhours_core::EventTime;
use chrono::NaiveDate;

/// A raw VEVENT component.
///
/// All times are naive: UTC values keep their UTC wall time, values with a
/// TZID keep their local wall time and floating values are kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawComponent {
    /// The UID shared by a series and its overridden instances.
    pub uid: Option<String>,

    /// The event title.
    pub summary: Option<String>,

    /// The event description.
    pub description: Option<String>,

    /// The event location.
    pub location: Option<String>,

    /// The STATUS value (e.g. `CONFIRMED`, `TENTATIVE`, `CANCELLED`).
    pub status: Option<String>,

    /// The TRANSP value (`OPAQUE` or `TRANSPARENT`).
    pub transparency: Option<String>,

    /// DTSTART.
    pub start: Option<EventTime>,

    /// DTEND, or DTSTART + DURATION when only a duration is given.
    pub end: Option<EventTime>,

    /// The RRULE text.
    pub rrule: Option<String>,

    /// Dates listed in EXDATE properties.
    pub exdates: Vec<NaiveDate>,

    /// The date of RECURRENCE-ID, set when this is an overridden instance.
    pub recurrence_id: Option<NaiveDate>,
}

impl RawComponent {
    /// Creates an empty component.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if STATUS is `CONFIRMED`.
    pub fn is_confirmed(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.eq_ignore_ascii_case("CONFIRMED"))
    }

    /// Returns true if the event blocks time.
    ///
    /// A component without TRANSP counts as not accepted.
    pub fn is_opaque(&self) -> bool {
        self.transparency
            .as_ref()
            .is_some_and(|t| !t.eq_ignore_ascii_case("TRANSPARENT"))
    }

    /// Returns the summary if it is not blank.
    pub fn title(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Returns true if the component carries an RRULE.
    pub fn is_recurring(&self) -> bool {
        self.rrule.is_some()
    }

    /// Returns true if this is an overridden instance of a series.
    pub fn is_override(&self) -> bool {
        self.recurrence_id.is_some()
    }

    /// Builder method to set the UID.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builder method to set the transparency.
    pub fn with_transparency(mut self, transparency: impl Into<String>) -> Self {
        self.transparency = Some(transparency.into());
        self
    }

    /// Builder method to set start and end.
    pub fn with_times(mut self, start: EventTime, end: Option<EventTime>) -> Self {
        self.start = Some(start);
        self.end = end;
        self
    }

    /// Builder method to set the recurrence rule.
    pub fn with_rrule(mut self, rrule: impl Into<String>) -> Self {
        self.rrule = Some(rrule.into());
        self
    }

    /// Builder method to add an exception date.
    pub fn with_exdate(mut self, date: NaiveDate) -> Self {
        self.exdates.push(date);
        self
    }

    /// Builder method to mark this as an overridden instance.
    pub fn with_recurrence_id(mut self, date: NaiveDate) -> Self {
        self.recurrence_id = Some(date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_is_case_insensitive() {
        assert!(RawComponent::new().with_status("CONFIRMED").is_confirmed());
        assert!(RawComponent::new().with_status("confirmed").is_confirmed());
        assert!(!RawComponent::new().with_status("TENTATIVE").is_confirmed());
        assert!(!RawComponent::new().is_confirmed());
    }

    #[test]
    fn missing_transparency_is_not_accepted() {
        assert!(RawComponent::new().with_transparency("OPAQUE").is_opaque());
        assert!(!RawComponent::new().with_transparency("TRANSPARENT").is_opaque());
        assert!(!RawComponent::new().is_opaque());
    }

    #[test]
    fn blank_summary_has_no_title() {
        assert_eq!(RawComponent::new().with_summary("Sync").title(), Some("Sync"));
        assert_eq!(RawComponent::new().with_summary("   ").title(), None);
        assert_eq!(RawComponent::new().title(), None);
    }

    #[test]
    fn recurrence_markers() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let series = RawComponent::new().with_rrule("FREQ=WEEKLY").with_exdate(day);
        assert!(series.is_recurring());
        assert!(!series.is_override());
        assert_eq!(series.exdates, vec![day]);

        let instance = RawComponent::new().with_recurrence_id(day);
        assert!(instance.is_override());
        assert!(!instance.is_recurring());
    }
}
