//! Reading and scanning the source dump
//!
//! The dump is loaded whole, split into top-level statements by
//! [`scanner`], and the `INSERT ... VALUES` statements among them are
//! parsed by [`insert`] into balanced-parenthesis tuples.

pub mod extract;
pub mod insert;
pub mod scanner;

pub use extract::{extract_group, Extraction};
pub use insert::{scan_inserts, split_tuples, InsertStatement, ValueList};
pub use scanner::{Statement, StatementScanner};

use crate::core::{MigrationError, MigrationResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The full text of a source dump
#[derive(Debug, Clone)]
pub struct DumpDocument {
    pub path: PathBuf,
    pub text: String,
}

impl DumpDocument {
    /// Read a dump into memory as UTF-8 text
    pub fn load<P: AsRef<Path>>(path: P) -> MigrationResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MigrationError::MissingInputFile {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| MigrationError::io(path, e))?;
        let mut text = String::from_utf8(bytes).map_err(|_| MigrationError::Decode {
            path: path.to_path_buf(),
        })?;
        if text.starts_with('\u{feff}') {
            text.replace_range(..'\u{feff}'.len_utf8(), "");
        }

        debug!("Loaded {} bytes from {}", text.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Build a document from text already in memory
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn inserts(&self) -> Vec<InsertStatement<'_>> {
        scan_inserts(&self.text)
    }
}

/// Insert statements found for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInventory {
    pub table: String,
    pub statements: usize,
    pub tuples: usize,

    /// Statements whose value list could not be split
    pub malformed: usize,
}

/// List every table that has INSERT statements, in order of first appearance
pub fn inspect(dump: &str) -> Vec<TableInventory> {
    let mut inventory: Vec<TableInventory> = Vec::new();

    for insert in scan_inserts(dump) {
        let idx = match inventory
            .iter()
            .position(|t| t.table.eq_ignore_ascii_case(&insert.table))
        {
            Some(idx) => idx,
            None => {
                inventory.push(TableInventory {
                    table: insert.table.clone(),
                    statements: 0,
                    tuples: 0,
                    malformed: 0,
                });
                inventory.len() - 1
            }
        };

        let entry = &mut inventory[idx];
        entry.statements += 1;
        match insert.value_list() {
            Ok(list) => entry.tuples += list.tuples.len(),
            Err(_) => entry.malformed += 1,
        }
    }

    inventory
}
