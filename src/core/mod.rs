//! Core domain models for the migration
//!
//! This module defines the configuration, the error type, the record
//! tuples and groups that flow between stages, and the run summary.

pub mod config;
pub mod error;
pub mod record;
pub mod state;

pub use config::{ExtractionMode, GroupConfig, IdentifierRename, MigrationConfig};
pub use error::{MigrationError, MigrationResult};
pub use record::{DateToken, RecordGroup, RecordTuple};
pub use state::{GroupSummary, RunSummary, Stage};
