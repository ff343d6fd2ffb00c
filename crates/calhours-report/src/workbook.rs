//! Workbook assembly.
//!
//! Merges the per-year CSV files into one XLSX workbook with one sheet per
//! year, in the order given. Week and Hours cells are written as numbers.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::error::{ReportResult, ReportWriteError};
use crate::rows::{HEADERS, NUMERIC_COLUMNS};

/// Sheet name used when there is no year to report.
pub const EMPTY_SHEET_NAME: &str = "Report";

const COLUMN_WIDTHS: [f64; 7] = [6.0, 40.0, 17.0, 17.0, 8.0, 25.0, 50.0];

/// One per-year CSV file to merge into the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
    pub year: i32,
    pub path: PathBuf,
}

/// Builds the workbook from `sources` and saves it to `output`.
///
/// With no sources the workbook still gets a single sheet holding the header
/// row.
pub fn assemble_workbook(sources: &[SheetSource], output: &Path) -> ReportResult<()> {
    let xlsx_err = |e: XlsxError| ReportWriteError::workbook(output, e);
    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    if sources.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(EMPTY_SHEET_NAME).map_err(xlsx_err)?;
        write_header(sheet, &header).map_err(xlsx_err)?;
    }

    for source in sources {
        let sheet = workbook.add_worksheet();
        sheet.set_name(source.year.to_string()).map_err(xlsx_err)?;
        let rows = copy_csv(sheet, &source.path, &header)?;
        debug!(year = source.year, rows, "Added sheet");
    }

    workbook.save(output).map_err(xlsx_err)?;
    Ok(())
}

fn write_header(sheet: &mut Worksheet, header: &Format) -> Result<(), XlsxError> {
    for (col, title) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
        sheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Copies the data rows of the CSV at `path` under the header of `sheet`.
///
/// Returns the number of data rows copied.
fn copy_csv(sheet: &mut Worksheet, path: &Path, header: &Format) -> ReportResult<u32> {
    let xlsx_err = |e: XlsxError| ReportWriteError::workbook(path, e);
    write_header(sheet, header).map_err(xlsx_err)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ReportWriteError::csv(path, e))?;

    let mut row = 0u32;
    for record in reader.records() {
        let record = record.map_err(|e| ReportWriteError::csv(path, e))?;
        row += 1;
        for (col, field) in record.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            let number = NUMERIC_COLUMNS
                .contains(&col)
                .then(|| field.parse::<f64>().ok())
                .flatten();
            match number {
                Some(n) => sheet.write_number(row, col as u16, n),
                None => sheet.write_string(row, col as u16, field),
            }
            .map_err(xlsx_err)?;
        }
    }
    Ok(row)
}
