//! Report output for calhours.
//!
//! Year buckets are first written as one CSV file per year into a temporary
//! directory, then merged into a single XLSX workbook with one sheet per
//! year. The temporary directory is removed once the workbook is saved, or
//! when writing fails.

pub mod error;
pub mod rows;
pub mod workbook;
pub mod year_csv;

use std::fs;
use std::path::{Path, PathBuf};

use calhours_core::YearBucket;
use tracing::{debug, info};

pub use error::{ReportResult, ReportWriteError};
pub use rows::{HEADERS, format_hours, row_fields};
pub use workbook::{EMPTY_SHEET_NAME, SheetSource, assemble_workbook};
pub use year_csv::{write_year_csv, year_csv_name};

/// What was written by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Path of the saved workbook.
    pub workbook: PathBuf,
    /// Sheet names, in workbook order.
    pub sheets: Vec<String>,
    /// Number of event rows across all sheets.
    pub rows: usize,
    /// Copies of the per-year CSV files, when they were kept.
    pub kept_csv: Vec<PathBuf>,
}

/// Writes `buckets` to the workbook at `output`.
///
/// When `keep_csv_in` is set, the per-year CSV files are copied into that
/// directory before the temporary directory is removed.
pub fn write_report(
    buckets: &[YearBucket],
    output: &Path,
    keep_csv_in: Option<&Path>,
) -> ReportResult<ReportSummary> {
    let scratch = tempfile::Builder::new().prefix("calhours-").tempdir()?;
    debug!(dir = %scratch.path().display(), "Created scratch directory");

    let mut sources = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let path = write_year_csv(bucket, scratch.path())?;
        sources.push(SheetSource {
            year: bucket.year,
            path,
        });
    }

    assemble_workbook(&sources, output)?;
    info!(path = %output.display(), sheets = sources.len().max(1), "Workbook saved");

    let mut kept_csv = Vec::new();
    if let Some(dir) = keep_csv_in {
        for source in &sources {
            let target = dir.join(year_csv_name(source.year));
            fs::copy(&source.path, &target)?;
            kept_csv.push(target);
        }
    }

    let sheets = if sources.is_empty() {
        vec![EMPTY_SHEET_NAME.to_string()]
    } else {
        sources.iter().map(|s| s.year.to_string()).collect()
    };

    Ok(ReportSummary {
        workbook: output.to_path_buf(),
        sheets,
        rows: buckets.iter().map(YearBucket::len).sum(),
        kept_csv,
    })
}
