//! Run summary models

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Load,
    Extract,
    Filter,
    Convert,
    Emit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Extract => "extract",
            Stage::Filter => "filter",
            Stage::Convert => "convert",
            Stage::Emit => "emit",
        };
        f.write_str(name)
    }
}

/// Counts for one record group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group name
    pub name: String,

    /// Target table the group is inserted into
    pub target_table: String,

    /// INSERT statements the tuples came from
    pub statements: usize,

    /// Tuples found before filtering
    pub found: usize,

    /// Tuples kept
    pub retained: usize,

    /// Kept tuples dated before the cutoff; the count reported as imported
    pub dated_retained: usize,

    /// Tuples dropped by the cutoff
    pub excluded: usize,

    /// Kept tuples without a date literal
    pub undated: usize,

    /// Kept tuples whose date literal is not a calendar date
    pub unparseable: usize,
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub cutoff: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub groups: Vec<GroupSummary>,

    /// Size of the rendered document in bytes
    pub output_bytes: usize,

    /// False for dry runs
    pub written: bool,
}

impl RunSummary {
    pub fn group(&self, name: &str) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn total_retained(&self) -> usize {
        self.groups.iter().map(|g| g.retained).sum()
    }

    /// Output size in MiB, as reported to the operator
    pub fn output_megabytes(&self) -> f64 {
        self.output_bytes as f64 / 1024.0 / 1024.0
    }
}
