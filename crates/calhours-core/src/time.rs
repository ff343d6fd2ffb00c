//! Time types for calendar events.
//!
//! This module provides [`EventTime`] for representing event start/end times,
//! which may be either a wall-clock datetime or an all-day date, and
//! [`elapsed_hours`] for turning a start/end pair into reportable hours.
//!
//! All datetimes are naive: any timezone offset is stripped when the calendar
//! is parsed, so values taken from differently-zoned properties can be
//! compared without conversion failures.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Represents the time of a calendar event.
///
/// Calendar events can have two types of times:
/// - **DateTime**: A wall-clock point in time, offset stripped
/// - **AllDay**: A date without a specific time (all-day events)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTime {
    /// A specific naive datetime.
    DateTime(NaiveDateTime),
    /// An all-day event date (no specific time).
    AllDay(NaiveDate),
}

impl EventTime {
    /// Creates a new `EventTime::DateTime`.
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a new `EventTime::AllDay` from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Returns `true` if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Returns `true` if this is a specific datetime.
    pub fn is_datetime(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }

    /// Converts to a naive datetime for comparison purposes.
    ///
    /// For all-day events, returns midnight on that date.
    pub fn naive(&self) -> NaiveDateTime {
        match self {
            Self::DateTime(dt) => *dt,
            Self::AllDay(date) => date.and_time(NaiveTime::MIN),
        }
    }

    /// Returns the date portion of this event time.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::DateTime(dt) => dt.date(),
            Self::AllDay(date) => *date,
        }
    }

    /// Shifts this time by `delta`, keeping its kind.
    ///
    /// All-day values move by whole days only; any sub-day remainder of
    /// `delta` is dropped.
    pub fn shifted(&self, delta: Duration) -> Self {
        match self {
            Self::DateTime(dt) => Self::DateTime(*dt + delta),
            Self::AllDay(date) => Self::AllDay(*date + Duration::days(delta.num_days())),
        }
    }

    /// Formats this time for a report cell.
    ///
    /// Datetimes render as `YYYY-MM-DD HH:MM` (seconds dropped), dates as
    /// `YYYY-MM-DD`.
    pub fn cell_text(&self) -> String {
        match self {
            Self::DateTime(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            Self::AllDay(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<NaiveDateTime> for EventTime {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveDate> for EventTime {
    fn from(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }
}

/// Returns the hours elapsed between `start` and `end`.
///
/// Two dates yield whole days times 24. Anything involving a time of day
/// yields the exact elapsed time, truncated to whole seconds.
pub fn elapsed_hours(start: &EventTime, end: &EventTime) -> f64 {
    match (start, end) {
        (EventTime::AllDay(s), EventTime::AllDay(e)) => ((*e - *s).num_days() * 24) as f64,
        _ => (end.naive() - start.naive()).num_seconds() as f64 / SECONDS_PER_HOUR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod event_time {
        use super::*;

        #[test]
        fn datetime_creation() {
            let et = EventTime::from_datetime(at(2025, 2, 5, 10, 30, 0));
            assert!(et.is_datetime());
            assert!(!et.is_all_day());
            assert_eq!(et.naive(), at(2025, 2, 5, 10, 30, 0));
        }

        #[test]
        fn allday_creation() {
            let et = EventTime::from_date(date(2025, 2, 5));
            assert!(et.is_all_day());
            assert!(!et.is_datetime());
            assert_eq!(et.naive(), at(2025, 2, 5, 0, 0, 0));
        }

        #[test]
        fn date_extraction() {
            let et = EventTime::from_datetime(at(2025, 2, 5, 23, 59, 0));
            assert_eq!(et.date(), date(2025, 2, 5));

            let et = EventTime::from_date(date(2025, 3, 15));
            assert_eq!(et.date(), date(2025, 3, 15));
        }

        #[test]
        fn shifted_keeps_kind() {
            let et = EventTime::from_datetime(at(2024, 1, 1, 9, 0, 0));
            assert_eq!(
                et.shifted(Duration::minutes(90)),
                EventTime::from_datetime(at(2024, 1, 1, 10, 30, 0))
            );

            let et = EventTime::from_date(date(2024, 1, 1));
            assert_eq!(
                et.shifted(Duration::days(2) + Duration::hours(5)),
                EventTime::from_date(date(2024, 1, 3))
            );
        }

        #[test]
        fn cell_text_drops_seconds() {
            let et = EventTime::from_datetime(at(2024, 3, 1, 9, 5, 42));
            assert_eq!(et.cell_text(), "2024-03-01 09:05");

            let et = EventTime::from_date(date(2024, 3, 1));
            assert_eq!(et.cell_text(), "2024-03-01");
        }
    }

    mod hours {
        use super::*;

        #[test]
        fn ninety_minutes() {
            let start = EventTime::from_datetime(at(2024, 3, 1, 9, 0, 0));
            let end = EventTime::from_datetime(at(2024, 3, 1, 10, 30, 0));
            assert_eq!(elapsed_hours(&start, &end), 1.5);
        }

        #[test]
        fn spans_midnight_and_days() {
            let start = EventTime::from_datetime(at(2024, 3, 1, 22, 0, 0));
            let end = EventTime::from_datetime(at(2024, 3, 3, 1, 15, 0));
            assert_eq!(elapsed_hours(&start, &end), 27.25);
        }

        #[test]
        fn matches_total_seconds() {
            let start = at(2024, 6, 10, 8, 17, 3);
            for secs in [0_i64, 59, 61, 3599, 3601, 86_399, 86_401, 200_000] {
                let end = start + Duration::seconds(secs);
                let hours = elapsed_hours(&EventTime::from(start), &EventTime::from(end));
                assert!((hours * SECONDS_PER_HOUR - secs as f64).abs() < 1e-6);
            }
        }

        #[test]
        fn truncates_sub_second_precision() {
            let start = at(2024, 6, 10, 8, 0, 0);
            let end = start + Duration::milliseconds(1_800_900);
            let hours = elapsed_hours(&EventTime::from(start), &EventTime::from(end));
            assert_eq!(hours, 0.5);
        }

        #[test]
        fn dates_count_whole_days() {
            for days in [0_i64, 1, 3, 14] {
                let start = date(2024, 2, 27);
                let end = start + Duration::days(days);
                let hours = elapsed_hours(&EventTime::from(start), &EventTime::from(end));
                assert_eq!(hours, (days * 24) as f64);
            }
        }

        #[test]
        fn mixed_kinds_use_midnight() {
            let start = EventTime::from_date(date(2024, 1, 1));
            let end = EventTime::from_datetime(at(2024, 1, 1, 1, 0, 0));
            assert_eq!(elapsed_hours(&start, &end), 1.0);
        }
    }
}
