//! Command-line front end for calhours.
//!
//! This crate provides the `calhours` binary: argument parsing, option
//! validation and the report command wiring the pipeline together.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::ReportOptions;
pub use error::{CliError, CliResult};
