//! The report command: calendar export in, weekly hours workbook out.

use std::fs;
use std::path::Path;

use calhours_core::{RangeMode, aggregate};
use calhours_ics::{normalize_components, parse_calendar};
use calhours_report::{ReportSummary, write_report};
use tracing::{debug, info, warn};

use crate::config::ReportOptions;
use crate::error::{CliError, CliResult};

/// Checks that `input` exists and has an `.ics` extension.
pub fn validate_input(input: &Path) -> CliResult<()> {
    if !input.is_file() {
        return Err(CliError::InputNotFound(input.to_path_buf()));
    }
    let is_ics = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ics"));
    if !is_ics {
        return Err(CliError::UnsupportedFormat(input.to_path_buf()));
    }
    Ok(())
}

/// Runs the whole pipeline for `options`.
///
/// parse -> normalize -> filter -> sort and group by year -> write.
pub fn run(options: &ReportOptions) -> CliResult<ReportSummary> {
    validate_input(&options.input)?;
    if let Some(month) = options.month {
        warn!(month, "Month argument is accepted but not applied as a filter");
    }

    info!("Extracting events from file: {}", options.input.display());
    let content = fs::read_to_string(&options.input).map_err(|source| CliError::Read {
        path: options.input.clone(),
        source,
    })?;
    let raws = parse_calendar(&content).map_err(|source| CliError::InvalidCalendar {
        path: options.input.clone(),
        source,
    })?;

    let events = normalize_components(&raws);
    let total = events.len();
    let events = options.range.apply(events);
    if options.range.mode() != RangeMode::Unbounded {
        debug!(
            mode = ?options.range.mode(),
            kept = events.len(),
            dropped = total - events.len(),
            "Applied date range"
        );
    }

    let buckets = aggregate(events);
    debug!(count = buckets.len(), "Year buckets created");
    for bucket in &buckets {
        debug!(
            year = bucket.year,
            events = bucket.len(),
            hours = bucket.total_hours(),
            "Events in bucket"
        );
    }

    let summary = write_report(&buckets, &options.output, options.csv_dir())?;
    info!("Done, your file: {}", summary.workbook.display());
    Ok(summary)
}
