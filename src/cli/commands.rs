//! CLI command definitions

use crate::core::MigrationConfig;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Run the migration
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Source dump (overrides the config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output SQL file (overrides the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cutoff date, YYYY-MM-DD; records on or after it are dropped
    #[arg(long, value_parser = parse_date)]
    pub cutoff: Option<NaiveDate>,

    /// Render the document but don't write it
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 1 when the migration fails
    #[arg(long)]
    pub fail_on_error: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunCommand {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, config: &mut MigrationConfig) {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(cutoff) = self.cutoff {
            config.cutoff = cutoff;
        }
    }
}

/// Validate a migration configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List the INSERT statements in a dump
#[derive(Debug, Args, Clone)]
pub struct InspectCommand {
    /// Source dump (overrides the config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}
