//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// calhours - Weekly hours report from an ICS calendar export
///
/// Reads a calendar export, keeps confirmed and accepted events, expands
/// recurring series and writes one worksheet per year with the ISO week and
/// duration of every event.
#[derive(Debug, Parser)]
#[command(name = "calhours")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the .ics calendar export
    pub input: PathBuf,

    /// Month of interest (1-12); accepted but not applied as a filter
    #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    // --- Filter flags ---
    /// Keep events starting on or after this date (YYYY-MM-DD)
    #[arg(long, short = 's', value_name = "YYYY-MM-DD")]
    pub start: Option<String>,

    /// Keep events starting on or before this date (YYYY-MM-DD)
    ///
    /// When earlier than --start, events inside the window are dropped
    /// instead.
    #[arg(long, short = 'e', value_name = "YYYY-MM-DD")]
    pub end: Option<String>,

    // --- Output flags ---
    /// Workbook path (defaults to the input path with an .xlsx extension)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Keep the per-year CSV files next to the workbook
    #[arg(long)]
    pub keep_csv: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "calhours",
            "work.ics",
            "5",
            "-v",
            "-s",
            "2024-01-01",
            "-e",
            "2024-12-31",
            "-o",
            "out.xlsx",
            "--keep-csv",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("work.ics"));
        assert_eq!(cli.month, Some(5));
        assert!(cli.verbose);
        assert_eq!(cli.start.as_deref(), Some("2024-01-01"));
        assert_eq!(cli.end.as_deref(), Some("2024-12-31"));
        assert_eq!(cli.output, Some(PathBuf::from("out.xlsx")));
        assert!(cli.keep_csv);
    }

    #[test]
    fn input_only() {
        let cli = Cli::try_parse_from(["calhours", "work.ics"]).unwrap();
        assert_eq!(cli.month, None);
        assert!(!cli.verbose);
        assert!(cli.start.is_none() && cli.end.is_none());
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["calhours", "work.ics", "13"]).is_err());
        assert!(Cli::try_parse_from(["calhours", "work.ics", "0"]).is_err());
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["calhours"]).is_err());
    }
}
