//! MySQL to PostgreSQL identifier rewriting
//!
//! Only the two differences the source dump exhibits are handled: backtick
//! identifier quoting and mixed-case column names. String literals pass
//! through untouched.

use crate::core::{IdentifierRename, RecordGroup};
use crate::dump::scanner::skip_quoted;

/// Rewrites value-list text into the target dialect
#[derive(Debug, Clone, Default)]
pub struct DialectConverter {
    renames: Vec<IdentifierRename>,
}

impl DialectConverter {
    pub fn new(renames: Vec<IdentifierRename>) -> Self {
        Self { renames }
    }

    pub fn renames(&self) -> &[IdentifierRename] {
        &self.renames
    }

    /// Drop backticks and apply the rename table outside string literals
    pub fn convert(&self, text: &str) -> String {
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut plain_start = 0;
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                quote @ (b'\'' | b'"') => {
                    out.push_str(&self.rewrite_plain(&text[plain_start..pos]));
                    let end = skip_quoted(bytes, pos, quote).unwrap_or(bytes.len());
                    out.push_str(&text[pos..end]);
                    pos = end;
                    plain_start = end;
                }
                _ => pos += 1,
            }
        }
        out.push_str(&self.rewrite_plain(&text[plain_start..]));
        out
    }

    /// Convert every tuple of a group
    pub fn convert_group(&self, group: RecordGroup) -> RecordGroup {
        let tuples = group
            .tuples
            .iter()
            .map(|tuple| tuple.map_text(|text| self.convert(text)))
            .collect();
        RecordGroup { tuples, ..group }
    }

    fn rewrite_plain(&self, segment: &str) -> String {
        let mut rewritten = segment.replace('`', "");
        for rule in &self.renames {
            if rewritten.contains(&rule.from) {
                rewritten = rewritten.replace(&rule.from, &rule.to);
            }
        }
        rewritten
    }
}
