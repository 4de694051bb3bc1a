//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{InspectCommand, RunCommand, ValidateCommand};
use std::ffi::OsString;

/// Extract historical records from a MySQL dump into PostgreSQL inserts
#[derive(Debug, Parser, Clone)]
#[command(name = "dump-migrate")]
#[command(version = "0.1.0")]
#[command(about = "Extract historical sales and payments from a MySQL dump", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to migration configuration file (built-in defaults if omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the migration and write the output file
    Run(RunCommand),

    /// Validate a migration configuration
    Validate(ValidateCommand),

    /// List the INSERT statements found in a dump
    Inspect(InspectCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
