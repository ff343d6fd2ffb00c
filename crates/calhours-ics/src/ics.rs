//! ICS/iCalendar parsing utilities.
//!
//! This module parses iCalendar (RFC 5545) data and converts every VEVENT to
//! a [`RawComponent`]. Values are read through the typed `icalendar` API, so
//! TEXT unescaping and date handling come from the crate. EXDATE lists and
//! DURATION are the only values decoded here.

use calhours_core::EventTime;
use chrono::{Duration, NaiveDate};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event, EventLike,
    Property, ValueType,
};
use tracing::{debug, warn};

use crate::error::{IcsError, IcsResult};
use crate::raw_event::RawComponent;

const DATE_FORMAT: &str = "%Y%m%d";

/// Parses ICS content and extracts its VEVENT components.
pub fn parse_calendar(ics: &str) -> IcsResult<Vec<RawComponent>> {
    let ics = ics.trim_start_matches('\u{feff}');
    let head = ics.trim_start().get(..15).unwrap_or_default();
    if !head.eq_ignore_ascii_case("BEGIN:VCALENDAR") {
        return Err(IcsError::NoCalendar);
    }

    let calendar = ics.parse::<Calendar>().map_err(IcsError::Parse)?;

    let raw: Vec<RawComponent> = calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(parse_event(event)),
            _ => None,
        })
        .collect();
    debug!(count = raw.len(), "Parsed events from ICS");
    Ok(raw)
}

/// Parses a single VEVENT component into a RawComponent.
fn parse_event(event: &Event) -> RawComponent {
    let mut raw = RawComponent::new();

    raw.uid = event.get_uid().map(str::to_string);
    raw.summary = event.get_summary().map(str::to_string);
    raw.description = event.get_description().map(str::to_string);
    raw.location = event.get_location().map(str::to_string);
    raw.status = event.property_value("STATUS").map(str::to_string);
    raw.transparency = event.property_value("TRANSP").map(str::to_string);
    raw.rrule = event.property_value("RRULE").map(str::to_string);

    raw.start = event.get_start().map(convert_date_time);
    raw.end = event.get_end().map(convert_date_time);
    raw.recurrence_id = event.get_recurrence_id().map(|id| id.date_naive());

    if let Some(properties) = event.multi_properties().get("EXDATE") {
        raw.exdates = properties.iter().flat_map(exception_dates).collect();
    }

    if raw.end.is_none()
        && let Some(start) = raw.start
        && let Some(value) = event.property_value("DURATION")
    {
        match parse_duration(value) {
            Some(duration) => raw.end = Some(start.shifted(duration)),
            None => warn!(uid = ?raw.uid, duration = value, "Unparsable DURATION"),
        }
    }

    debug!(
        uid = ?raw.uid,
        summary = ?raw.summary,
        start = ?raw.start,
        "Parsed event from ICS"
    );
    raw
}

/// Converts icalendar DatePerhapsTime to EventTime, discarding any offset.
///
/// UTC values keep their UTC wall time, TZID-qualified values their local
/// wall time.
pub fn convert_date_time(dt: DatePerhapsTime) -> EventTime {
    match dt {
        DatePerhapsTime::Date(date) => EventTime::from_date(date),
        DatePerhapsTime::DateTime(cdt) => EventTime::from_datetime(match cdt {
            CalendarDateTime::Utc(dt) => dt.naive_utc(),
            CalendarDateTime::Floating(naive) => naive,
            CalendarDateTime::WithTimezone { date_time, tzid: _ } => date_time,
        }),
    }
}

/// Dates listed by one EXDATE property. The value may hold several
/// comma-separated dates or datetimes.
fn exception_dates(property: &Property) -> Vec<NaiveDate> {
    let is_date = property.value_type() == Some(ValueType::Date);
    property
        .value()
        .split(',')
        .map(str::trim)
        .filter_map(|value| {
            if is_date {
                NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
            } else {
                value
                    .parse::<CalendarDateTime>()
                    .ok()
                    .map(|cdt| DatePerhapsTime::DateTime(cdt).date_naive())
            }
        })
        .collect()
}

/// Parses an RFC 5545 DURATION value such as `PT1H30M`, `P1D` or `P2W`.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (negative, s) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let s = s.strip_prefix(['P', 'p'])?;

    let mut total = Duration::zero();
    let mut number = String::new();
    let mut in_time = false;
    for c in s.chars() {
        match c.to_ascii_uppercase() {
            'T' if number.is_empty() => in_time = true,
            d if d.is_ascii_digit() => number.push(d),
            unit => {
                let n: i64 = number.parse().ok()?;
                number.clear();
                total += match (unit, in_time) {
                    ('W', false) => Duration::weeks(n),
                    ('D', false) => Duration::days(n),
                    ('H', true) => Duration::hours(n),
                    ('M', true) => Duration::minutes(n),
                    ('S', true) => Duration::seconds(n),
                    _ => return None,
                };
            }
        }
    }
    if !number.is_empty() {
        return None;
    }

    Some(if negative { -total } else { total })
}
