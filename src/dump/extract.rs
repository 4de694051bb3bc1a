//! Record group extraction

use crate::core::{ExtractionMode, GroupConfig, MigrationError, MigrationResult, RecordGroup, RecordTuple};
use crate::dump::insert::InsertStatement;
use crate::dump::scanner::line_of;
use tracing::debug;

/// A record group plus anything worth telling the operator about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub group: RecordGroup,

    /// Non-fatal oddities (extra statements, trailing clauses)
    pub warnings: Vec<String>,
}

/// Gather the tuples of one record group from the dump's insert statements
///
/// In [`ExtractionMode::First`] only the first matching statement is used;
/// in [`ExtractionMode::All`] every matching statement contributes, in
/// document order. Fails with [`MigrationError::PatternNotFound`] when no
/// statement targets the group's source table.
pub fn extract_group(
    dump: &str,
    inserts: &[InsertStatement<'_>],
    config: &GroupConfig,
) -> MigrationResult<Extraction> {
    let matching: Vec<&InsertStatement<'_>> = inserts
        .iter()
        .filter(|insert| insert.targets(&config.source_table))
        .collect();

    if matching.is_empty() {
        return Err(MigrationError::PatternNotFound {
            table: config.source_table.clone(),
        });
    }

    let mut warnings = Vec::new();
    let used = match config.mode {
        ExtractionMode::First => {
            if matching.len() > 1 {
                warnings.push(format!(
                    "table '{}' has {} INSERT statements, only the first is used",
                    config.source_table,
                    matching.len()
                ));
            }
            &matching[..1]
        }
        ExtractionMode::All => &matching[..],
    };

    let mut group = RecordGroup::new(&config.name, &config.source_table);
    for insert in used {
        let line = line_of(dump, insert.offset);
        let list = insert.value_list().map_err(|reason| MigrationError::MalformedStatement {
            table: config.source_table.clone(),
            reason: format!("{} (statement at line {})", reason, line),
        })?;

        if !insert.terminated {
            warnings.push(format!(
                "INSERT for '{}' at line {} is not terminated by ';'",
                config.source_table, line
            ));
        }
        if let Some(trailing) = list.trailing {
            warnings.push(format!(
                "ignoring clause after the values of '{}' at line {}: {}",
                config.source_table,
                line,
                truncate(trailing, 60)
            ));
        }

        debug!(
            "{}: {} tuples from statement at line {}",
            config.source_table,
            list.tuples.len(),
            line
        );
        group.statements += 1;
        group.tuples.extend(list.tuples.into_iter().map(RecordTuple::new));
    }

    Ok(Extraction { group, warnings })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
