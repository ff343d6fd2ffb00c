//! RawComponent to ReportEvent conversion pipeline.
//!
//! The normalization process:
//! 1. Drops components that are not confirmed, not accepted or untitled
//! 2. Expands recurring components into one event per occurrence
//! 3. Builds a [`ReportEvent`] with its computed duration for everything else
//!
//! Overridden instances (components with RECURRENCE-ID) replace the matching
//! occurrence of their series: the RECURRENCE-ID date is treated as an
//! exception of the series with the same UID.

use std::collections::HashMap;

use calhours_core::{EventTime, Expander, ReportEvent};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::raw_event::RawComponent;

/// Why a component was left out of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotConfirmed,
    NotAccepted,
    NoSummary,
    NoStart,
}

/// Checks the admission filter.
///
/// A component is admitted when it is confirmed, accepted (TRANSP present and
/// not `TRANSPARENT`) and has a non-blank summary.
pub fn admission(raw: &RawComponent) -> Result<(), SkipReason> {
    if !raw.is_confirmed() {
        return Err(SkipReason::NotConfirmed);
    }
    if !raw.is_opaque() {
        return Err(SkipReason::NotAccepted);
    }
    if raw.title().is_none() {
        return Err(SkipReason::NoSummary);
    }
    Ok(())
}

/// Returns true if the component passes the admission filter.
pub fn is_admitted(raw: &RawComponent) -> bool {
    admission(raw).is_ok()
}

/// Converts one admitted component into report events.
///
/// A recurring component yields one event per occurrence; `overridden` lists
/// extra exception dates coming from overridden instances of the series. If
/// the rule cannot be evaluated the component is reported as a single event.
pub fn normalize_component(
    raw: &RawComponent,
    expander: &Expander,
    overridden: &[NaiveDate],
) -> Result<Vec<ReportEvent>, SkipReason> {
    let title = raw.title().ok_or(SkipReason::NoSummary)?;
    let start = raw.start.ok_or(SkipReason::NoStart)?;
    let build = |start: EventTime, end: EventTime| {
        ReportEvent::new(title, start, end)
            .with_description(raw.description.clone().unwrap_or_default())
            .with_location(raw.location.clone().unwrap_or_default())
    };

    if let Some(ref rule) = raw.rrule
        && !raw.is_override()
    {
        let mut exceptions = raw.exdates.clone();
        exceptions.extend_from_slice(overridden);
        match expander.expand(rule, start, raw.end, &exceptions) {
            Ok(occurrences) => {
                return Ok(occurrences
                    .into_iter()
                    .map(|o| build(o.start, o.end))
                    .collect());
            }
            Err(e) => warn!(
                summary = title,
                rule = %rule,
                error = %e,
                "Recurrence rule could not be expanded, treating as a single event"
            ),
        }
    }

    let end = raw.end.unwrap_or(start);
    debug!(start = ?start, end = ?end, "Single event");
    Ok(vec![build(start, end)])
}

/// Normalizes every component of a calendar with the default expander.
pub fn normalize_components(raws: &[RawComponent]) -> Vec<ReportEvent> {
    normalize_components_with(raws, &Expander::default())
}

/// Normalizes every component of a calendar.
///
/// Components failing the admission filter are skipped. The result keeps the
/// calendar order; sorting happens later.
pub fn normalize_components_with(raws: &[RawComponent], expander: &Expander) -> Vec<ReportEvent> {
    let mut overridden: HashMap<&str, Vec<NaiveDate>> = HashMap::new();
    for raw in raws {
        if let (Some(uid), Some(date)) = (raw.uid.as_deref(), raw.recurrence_id) {
            overridden.entry(uid).or_default().push(date);
        }
    }

    let mut events = Vec::new();
    for raw in raws {
        if let Err(reason) = admission(raw) {
            debug!(summary = ?raw.summary, reason = ?reason, "Skipping component");
            continue;
        }
        debug!(summary = ?raw.summary, "Processing");

        let series_overrides = raw
            .uid
            .as_deref()
            .and_then(|uid| overridden.get(uid))
            .map(Vec::as_slice)
            .unwrap_or_default();
        match normalize_component(raw, expander, series_overrides) {
            Ok(normalized) => events.extend(normalized),
            Err(reason) => {
                debug!(summary = ?raw.summary, reason = ?reason, "Skipping component");
            }
        }
    }

    debug!(count = events.len(), "Total events added");
    events
}
