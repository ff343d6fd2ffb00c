//! Report writer error types.

use std::io;
use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Result type for report writing.
pub type ReportResult<T> = Result<T, ReportWriteError>;

/// Errors that can occur while writing the report files.
#[derive(Debug, Error)]
pub enum ReportWriteError {
    /// A per-year CSV file could not be written or read back.
    #[error("failed to write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The workbook could not be assembled or saved.
    #[error("failed to write workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// IO error (temporary directory, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ReportWriteError {
    /// Creates a CSV error for `path`.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Creates a workbook error for `path`.
    pub fn workbook(path: impl Into<PathBuf>, source: XlsxError) -> Self {
        Self::Workbook {
            path: path.into(),
            source,
        }
    }
}
