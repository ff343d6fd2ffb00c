//! Recurrence expansion.
//!
//! Turns a recurrence rule anchored at an event start into a bounded list of
//! concrete occurrences. Expansion always stops at a fixed horizon after the
//! series start; any `COUNT` or `UNTIL` part embedded in the rule is dropped
//! when the rule is parsed and replaced by that horizon.
//!
//! Rule evaluation itself is done by the [`rrule`] crate. Every value handed
//! to it is a naive datetime pinned to UTC, so mixed offsets in the source
//! calendar never reach the evaluator.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone};
use rrule::{RRule, Tz, Unvalidated};
use thiserror::Error;
use tracing::debug;

use crate::time::EventTime;

/// Days after the series start past which no occurrence is produced.
pub const HORIZON_DAYS: i64 = 3650;

/// Result type for recurrence operations.
pub type RecurrenceResult<T> = Result<T, RecurrenceError>;

/// Errors raised while parsing or evaluating a recurrence rule.
///
/// Callers treat every variant as "not recurring" and fall back to handling
/// the event as a single occurrence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The rule text is empty.
    #[error("recurrence rule is empty")]
    Empty,

    /// A `;`-separated part is not of the form `NAME=VALUE`.
    #[error("malformed recurrence rule part: {part:?}")]
    MalformedPart { part: String },

    /// The rule has no `FREQ` part.
    #[error("recurrence rule has no FREQ part")]
    MissingFrequency,

    /// The evaluator rejected the rule.
    #[error("invalid recurrence rule: {0}")]
    Invalid(String),
}

/// A recurrence rule split into its `NAME=VALUE` parts.
///
/// Termination parts (`COUNT`, `UNTIL`) are removed during parsing. The
/// rule then only describes the pattern; how far it runs is decided by the
/// caller through [`RecurrenceRule::occurrences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    parts: Vec<(String, String)>,
    dropped: Vec<String>,
}

impl RecurrenceRule {
    /// Parses rule text such as `FREQ=WEEKLY;BYDAY=MO;COUNT=10`.
    ///
    /// An optional leading `RRULE:` is accepted. Names and values are
    /// upper-cased.
    pub fn parse(text: &str) -> RecurrenceResult<Self> {
        let text = text.trim();
        let text = match text.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("RRULE:") => &text[6..],
            _ => text,
        };
        if text.is_empty() {
            return Err(RecurrenceError::Empty);
        }

        let mut parts = Vec::new();
        let mut dropped = Vec::new();
        for part in text.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((name, value)) = part.split_once('=') else {
                return Err(RecurrenceError::MalformedPart {
                    part: part.to_string(),
                });
            };
            let name = name.trim().to_ascii_uppercase();
            let value = value.trim().to_ascii_uppercase();
            if name.is_empty() || value.is_empty() {
                return Err(RecurrenceError::MalformedPart {
                    part: part.to_string(),
                });
            }
            match name.as_str() {
                "COUNT" | "UNTIL" => dropped.push(format!("{name}={value}")),
                _ => parts.push((name, value)),
            }
        }

        if !parts.iter().any(|(name, _)| name == "FREQ") {
            return Err(RecurrenceError::MissingFrequency);
        }

        Ok(Self { parts, dropped })
    }

    /// Returns the `FREQ` value.
    pub fn frequency(&self) -> &str {
        self.parts
            .iter()
            .find(|(name, _)| name == "FREQ")
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }

    /// Returns the termination parts removed from the original text.
    pub fn dropped_termination(&self) -> &[String] {
        &self.dropped
    }

    /// Renders the rule, bounded by `until`.
    fn bounded_text(&self, until: NaiveDateTime) -> String {
        let mut text = self
            .parts
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(";");
        text.push_str(&format!(";UNTIL={}", until.format("%Y%m%dT%H%M%SZ")));
        text
    }

    /// Evaluates the rule from `start` up to and including `until`.
    ///
    /// Returns the occurrence starts in ascending order. The rendered rule is
    /// bounded by `until`, so iteration always terminates there whatever the
    /// frequency.
    pub fn occurrences(
        &self,
        start: NaiveDateTime,
        until: NaiveDateTime,
    ) -> RecurrenceResult<Vec<NaiveDateTime>> {
        let rule = self
            .bounded_text(until)
            .parse::<RRule<Unvalidated>>()
            .map_err(|e| RecurrenceError::Invalid(e.to_string()))?;
        let set = rule
            .build(Tz::UTC.from_utc_datetime(&start))
            .map_err(|e| RecurrenceError::Invalid(e.to_string()))?;

        Ok((&set)
            .into_iter()
            .map(|dt| dt.naive_utc())
            .take_while(|dt| *dt <= until)
            .collect())
    }
}

/// One concrete instance of a recurring event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: EventTime,
    pub end: EventTime,
}

/// Recurrence expansion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expander {
    /// How far past the series start occurrences are produced.
    pub horizon: Duration,
    /// Occurrence length when the series has no end.
    pub default_duration: Duration,
}

impl Default for Expander {
    fn default() -> Self {
        Self {
            horizon: Duration::days(HORIZON_DAYS),
            default_duration: Duration::hours(1),
        }
    }
}

impl Expander {
    /// Expands `rule_text` anchored at `start`.
    ///
    /// Each occurrence lasts as long as `end - start`, or
    /// [`Expander::default_duration`] when `end` is `None`. Occurrences whose
    /// start date is listed in `exceptions` are dropped. Occurrence starts keep
    /// the kind (date or datetime) of `start`; occurrence ends keep the kind of
    /// `end`.
    pub fn expand(
        &self,
        rule_text: &str,
        start: EventTime,
        end: Option<EventTime>,
        exceptions: &[NaiveDate],
    ) -> RecurrenceResult<Vec<Occurrence>> {
        let rule = RecurrenceRule::parse(rule_text)?;
        if !rule.dropped_termination().is_empty() {
            debug!(
                dropped = ?rule.dropped_termination(),
                "Ignoring recurrence termination in favor of the horizon"
            );
        }

        let anchor = start.naive();
        let until = anchor + self.horizon;
        let duration = end
            .map(|end| end.naive() - anchor)
            .unwrap_or(self.default_duration);

        let starts = rule.occurrences(anchor, until)?;

        let exceptions: HashSet<NaiveDate> = exceptions.iter().copied().collect();
        let occurrences: Vec<Occurrence> = starts
            .into_iter()
            .filter(|dt| !exceptions.contains(&dt.date()))
            .map(|dt| Occurrence {
                start: match start {
                    EventTime::AllDay(_) => EventTime::AllDay(dt.date()),
                    EventTime::DateTime(_) => EventTime::DateTime(dt),
                },
                end: match end {
                    Some(EventTime::AllDay(_)) => EventTime::AllDay((dt + duration).date()),
                    _ => EventTime::DateTime(dt + duration),
                },
            })
            .collect();

        debug!(
            rule = rule_text,
            frequency = rule.frequency(),
            count = occurrences.len(),
            "Expanded recurrence"
        );
        Ok(occurrences)
    }
}

/// Expands a rule with the default ten-year horizon and one-hour default
/// duration. See [`Expander::expand`].
pub fn expand(
    rule_text: &str,
    start: EventTime,
    end: Option<EventTime>,
    exceptions: &[NaiveDate],
) -> RecurrenceResult<Vec<Occurrence>> {
    Expander::default().expand(rule_text, start, end, exceptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    mod parse {
        use super::*;

        #[test]
        fn strips_termination_parts() {
            let rule = RecurrenceRule::parse("FREQ=DAILY;COUNT=3;INTERVAL=2").unwrap();
            assert_eq!(rule.frequency(), "DAILY");
            assert_eq!(rule.dropped_termination(), ["COUNT=3".to_string()]);
            assert_eq!(
                rule.bounded_text(at(2025, 1, 1, 0, 0)),
                "FREQ=DAILY;INTERVAL=2;UNTIL=20250101T000000Z"
            );
        }

        #[test]
        fn accepts_prefix_and_lowercase() {
            let rule = RecurrenceRule::parse("RRULE:freq=weekly;byday=mo;until=20240301").unwrap();
            assert_eq!(rule.frequency(), "WEEKLY");
            assert_eq!(rule.dropped_termination(), ["UNTIL=20240301".to_string()]);
        }

        #[test]
        fn rejects_empty() {
            assert_eq!(RecurrenceRule::parse("  "), Err(RecurrenceError::Empty));
            assert_eq!(RecurrenceRule::parse("RRULE:"), Err(RecurrenceError::Empty));
        }

        #[test]
        fn rejects_missing_frequency() {
            assert_eq!(
                RecurrenceRule::parse("INTERVAL=2;COUNT=4"),
                Err(RecurrenceError::MissingFrequency)
            );
        }

        #[test]
        fn rejects_malformed_part() {
            assert!(matches!(
                RecurrenceRule::parse("FREQ=DAILY;garbage"),
                Err(RecurrenceError::MalformedPart { .. })
            ));
        }
    }

    mod expansion {
        use super::*;

        #[test]
        fn weekly_with_exception_runs_to_horizon() {
            let start = EventTime::from_datetime(at(2024, 1, 1, 9, 0));
            let end = EventTime::from_datetime(at(2024, 1, 1, 10, 0));
            let occurrences =
                expand("FREQ=WEEKLY", start, Some(end), &[date(2024, 1, 8)]).unwrap();

            let dates: Vec<NaiveDate> = occurrences.iter().map(|o| o.start.date()).collect();
            assert_eq!(
                &dates[..3],
                &[date(2024, 1, 1), date(2024, 1, 15), date(2024, 1, 22)]
            );
            assert!(!dates.contains(&date(2024, 1, 8)));
            // 522 Mondays fit in 3650 days, one of them excluded.
            assert_eq!(occurrences.len(), 521);
            assert_eq!(dates.last(), Some(&date(2033, 12, 26)));
        }

        #[test]
        fn missing_end_defaults_to_one_hour() {
            let start = EventTime::from_datetime(at(2024, 1, 1, 9, 0));
            let occurrences = expand("FREQ=WEEKLY", start, None, &[]).unwrap();
            assert_eq!(
                occurrences[1],
                Occurrence {
                    start: EventTime::from_datetime(at(2024, 1, 8, 9, 0)),
                    end: EventTime::from_datetime(at(2024, 1, 8, 10, 0)),
                }
            );
        }

        #[test]
        fn count_does_not_truncate() {
            let start = at(2024, 1, 1, 9, 0);
            let occurrences = expand(
                "FREQ=DAILY;COUNT=3",
                EventTime::from_datetime(start),
                None,
                &[],
            )
            .unwrap();
            let horizon = start + Duration::days(HORIZON_DAYS);
            assert_eq!(occurrences.len(), (HORIZON_DAYS + 1) as usize);
            assert_eq!(occurrences.last().unwrap().start.naive(), horizon);
        }

        #[test]
        fn past_until_does_not_truncate() {
            let start = EventTime::from_datetime(at(2024, 1, 1, 9, 0));
            let occurrences =
                expand("FREQ=MONTHLY;UNTIL=20200101T000000Z", start, None, &[]).unwrap();
            assert_eq!(occurrences.len(), 120);
        }

        #[test]
        fn never_passes_horizon() {
            let start = at(2023, 5, 17, 13, 45);
            let horizon = start + Duration::days(HORIZON_DAYS);
            for rule in [
                "FREQ=DAILY;UNTIL=20990101T000000Z",
                "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=100000",
                "FREQ=YEARLY",
            ] {
                let occurrences =
                    expand(rule, EventTime::from_datetime(start), None, &[]).unwrap();
                assert!(!occurrences.is_empty());
                assert!(occurrences.iter().all(|o| o.start.naive() <= horizon));
            }
        }

        #[test]
        fn exceptions_match_by_date_only() {
            let start = EventTime::from_datetime(at(2024, 1, 1, 9, 0));
            let exceptions = [date(2024, 1, 2), date(2024, 1, 4), date(2025, 6, 30)];
            let occurrences = expand("FREQ=DAILY", start, None, &exceptions).unwrap();
            assert!(
                occurrences
                    .iter()
                    .all(|o| !exceptions.contains(&o.start.date()))
            );
            assert_eq!(occurrences.len(), (HORIZON_DAYS + 1) as usize - 3);
        }

        #[test]
        fn all_day_series_keeps_dates() {
            let start = EventTime::from_date(date(2024, 2, 5));
            let end = EventTime::from_date(date(2024, 2, 6));
            let occurrences = expand("FREQ=WEEKLY;COUNT=2", start, Some(end), &[]).unwrap();
            assert_eq!(
                occurrences[1],
                Occurrence {
                    start: EventTime::from_date(date(2024, 2, 12)),
                    end: EventTime::from_date(date(2024, 2, 13)),
                }
            );
        }

        #[test]
        fn unknown_frequency_is_an_error() {
            let start = EventTime::from_datetime(at(2024, 1, 1, 9, 0));
            assert!(matches!(
                expand("FREQ=SOMETIMES", start, None, &[]),
                Err(RecurrenceError::Invalid(_))
            ));
        }

        #[test]
        fn hourly_series_reaches_horizon() {
            let start = at(2024, 1, 1, 0, 0);
            let occurrences =
                expand("FREQ=HOURLY", EventTime::from_datetime(start), None, &[]).unwrap();
            let horizon = start + Duration::days(HORIZON_DAYS);
            assert_eq!(occurrences.len(), (HORIZON_DAYS * 24 + 1) as usize);
            assert_eq!(occurrences.last().unwrap().start.naive(), horizon);
        }

        #[test]
        fn custom_horizon() {
            let expander = Expander {
                horizon: Duration::days(14),
                ..Expander::default()
            };
            let start = EventTime::from_datetime(at(2024, 1, 1, 9, 0));
            let occurrences = expander.expand("FREQ=WEEKLY", start, None, &[]).unwrap();
            assert_eq!(occurrences.len(), 3);
        }
    }
}
