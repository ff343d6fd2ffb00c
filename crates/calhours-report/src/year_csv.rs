//! Per-year CSV files.
//!
//! Each year bucket is written to `year_<YYYY>.csv` with every field quoted.
//! These files are the intermediate units the workbook is assembled from.

use std::path::{Path, PathBuf};

use calhours_core::YearBucket;
use csv::{QuoteStyle, WriterBuilder};
use tracing::debug;

use crate::error::{ReportResult, ReportWriteError};
use crate::rows::{HEADERS, row_fields};

/// File name used for the CSV of `year`.
pub fn year_csv_name(year: i32) -> String {
    format!("year_{year}.csv")
}

/// Writes `bucket` to `dir/year_<YYYY>.csv` and returns the file path.
pub fn write_year_csv(bucket: &YearBucket, dir: &Path) -> ReportResult<PathBuf> {
    let path = dir.join(year_csv_name(bucket.year));
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(&path)
        .map_err(|e| ReportWriteError::csv(&path, e))?;

    writer
        .write_record(HEADERS)
        .map_err(|e| ReportWriteError::csv(&path, e))?;
    for entry in &bucket.entries {
        writer
            .write_record(row_fields(entry))
            .map_err(|e| ReportWriteError::csv(&path, e))?;
    }
    writer
        .flush()
        .map_err(|e| ReportWriteError::csv(&path, e.into()))?;

    debug!(year = bucket.year, rows = bucket.len(), path = %path.display(), "Wrote CSV");
    Ok(path)
}
