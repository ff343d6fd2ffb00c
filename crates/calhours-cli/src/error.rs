//! CLI error types.

use std::io;
use std::path::PathBuf;

use calhours_ics::IcsError;
use calhours_report::ReportWriteError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a calhours run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input path does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input path is not an .ics file.
    #[error("unsupported input format: {} (expected an .ics file)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A --start/--end value is not a YYYY-MM-DD date.
    #[error("invalid date for --{flag}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDateFlag { flag: &'static str, value: String },

    /// The input could not be parsed as a calendar.
    #[error("invalid calendar {}: {source}", path.display())]
    InvalidCalendar {
        path: PathBuf,
        #[source]
        source: IcsError,
    },

    /// The input could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The report could not be written.
    #[error(transparent)]
    OutputWrite(#[from] ReportWriteError),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Bad input exits with 2, output failures with 3, anything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound(_)
            | Self::UnsupportedFormat(_)
            | Self::InvalidDateFlag { .. }
            | Self::InvalidCalendar { .. } => 2,
            Self::OutputWrite(_) => 3,
            Self::Read { .. } => 1,
        }
    }
}
