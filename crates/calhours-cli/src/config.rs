//! Run configuration.
//!
//! Everything comes from the command line; [`ReportOptions`] is the validated
//! form of [`Cli`] the report command runs with.

use std::path::{Path, PathBuf};

use calhours_core::{DateRange, TracingConfig};
use chrono::NaiveDate;

use crate::cli::Cli;
use crate::error::{CliError, CliResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validated options for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Calendar export to read.
    pub input: PathBuf,
    /// Workbook to write.
    pub output: PathBuf,
    /// Date filter on event start dates.
    pub range: DateRange,
    /// Month given on the command line. Informational only.
    pub month: Option<u32>,
    pub verbose: bool,
    /// Keep the per-year CSV files next to the workbook.
    pub keep_csv: bool,
}

impl ReportOptions {
    /// Builds options from parsed arguments.
    ///
    /// Fails on a malformed `--start` or `--end` value. The input path itself
    /// is checked when the report runs.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let start = parse_date_flag("start", cli.start.as_deref())?;
        let end = parse_date_flag("end", cli.end.as_deref())?;
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output(&cli.input));

        Ok(Self {
            input: cli.input.clone(),
            output,
            range: DateRange::new(start, end),
            month: cli.month,
            verbose: cli.verbose,
            keep_csv: cli.keep_csv,
        })
    }

    /// Logging setup for this run: DEBUG with `-v`, INFO otherwise.
    pub fn tracing_config(&self) -> TracingConfig {
        if self.verbose {
            TracingConfig::verbose()
        } else {
            TracingConfig::default()
        }
    }

    /// Directory the CSV files are kept in, when requested.
    pub fn csv_dir(&self) -> Option<&Path> {
        if !self.keep_csv {
            return None;
        }
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Some(parent),
            _ => Some(Path::new(".")),
        }
    }
}

/// Parses an optional `YYYY-MM-DD` flag value.
pub fn parse_date_flag(flag: &'static str, value: Option<&str>) -> CliResult<Option<NaiveDate>> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v.trim(), DATE_FORMAT).map_err(|_| {
                CliError::InvalidDateFlag {
                    flag,
                    value: v.to_string(),
                }
            })
        })
        .transpose()
}

/// Workbook path derived from the input: same location, `.xlsx` extension.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("xlsx")
}
