//! Error types for the migration pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a migration run
///
/// None of these leave an output file behind: the emitter only runs once
/// every record group has been extracted.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Input file not found: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("No INSERT statement found for table '{table}'")]
    PatternNotFound { table: String },

    #[error("Malformed INSERT statement for table '{table}': {reason}")]
    MalformedStatement { table: String, reason: String },

    #[error("Input file is not valid UTF-8: {}", path.display())]
    Decode { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MigrationError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrationError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the library
pub type MigrationResult<T> = Result<T, MigrationError>;
