//! Report row layout.

use calhours_core::WeekEntry;

/// Column headers, in output order.
pub const HEADERS: [&str; 7] = [
    "Week",
    "Summary",
    "Start Time",
    "End Time",
    "Hours",
    "Location",
    "Description",
];

/// Columns holding numbers (Week, Hours).
pub const NUMERIC_COLUMNS: [usize; 2] = [0, 4];

/// Renders one entry as the text fields of a report row.
pub fn row_fields(entry: &WeekEntry) -> [String; 7] {
    let event = &entry.event;
    [
        entry.week.to_string(),
        event.summary.clone(),
        event.start.cell_text(),
        event.end.cell_text(),
        format_hours(event.duration_hours),
        event.location.clone(),
        event.description.clone(),
    ]
}

/// Formats hours with at least one decimal place (`1.5`, `24.0`).
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.1}")
    } else {
        hours.to_string()
    }
}
