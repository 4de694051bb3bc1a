//! dump-migrate - extract historical records from a MySQL dump into PostgreSQL inserts

pub mod cli;
pub mod core;
pub mod dump;
pub mod execution;
pub mod transform;

// Re-export commonly used types
pub use core::{MigrationConfig, MigrationError, MigrationResult, RunSummary, Stage};
pub use dump::DumpDocument;
pub use execution::{MigrationEngine, RunOutput, StageEvent};
pub use transform::{DialectConverter, FilterStats};
