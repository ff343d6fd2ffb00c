//! calhours CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use calhours_cli::commands::report;
use calhours_cli::error::CliResult;
use calhours_cli::{Cli, ReportOptions};
use calhours_core::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match ReportOptions::from_cli(&cli).and_then(|options| run(&options)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(options: &ReportOptions) -> CliResult<()> {
    if let Err(e) = init_tracing(options.tracing_config()) {
        eprintln!("warning: {e}");
    }

    report::run(options)?;
    Ok(())
}
