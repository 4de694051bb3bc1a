//! Record tuples and groups extracted from a dump

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// First quoted `'YYYY-MM-DD'` literal in a tuple
static DATE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(\d{4}-\d{2}-\d{2})'").expect("date literal pattern"));

/// One parenthesized tuple of field literals, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTuple {
    text: String,
}

/// What the date predicate found in a tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    /// No quoted date literal at all
    Absent,
    /// Looks like a date but is not a calendar day (e.g. `2025-02-30`)
    Unparseable(String),
    /// A valid calendar date
    Valid(NaiveDate),
}

impl DateToken {
    /// Find and classify the first date literal in `text`
    pub fn scan(text: &str) -> Self {
        let Some(caps) = DATE_LITERAL.captures(text) else {
            return DateToken::Absent;
        };
        let raw = &caps[1];
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => DateToken::Valid(date),
            Err(_) => DateToken::Unparseable(raw.to_string()),
        }
    }

    /// Whether a record carrying this token survives the cutoff
    ///
    /// Only a valid date on or after the cutoff drops the record.
    pub fn is_retained(&self, cutoff: NaiveDate) -> bool {
        match self {
            DateToken::Valid(date) => *date < cutoff,
            DateToken::Absent | DateToken::Unparseable(_) => true,
        }
    }
}

impl RecordTuple {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The tuple source text, parentheses included
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn date_token(&self) -> DateToken {
        DateToken::scan(&self.text)
    }

    /// Apply a text rewrite, keeping the tuple boundaries
    pub fn map_text<F: FnOnce(&str) -> String>(&self, f: F) -> Self {
        Self { text: f(&self.text) }
    }
}

/// The tuples of one logical table gathered from the dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGroup {
    /// Group name from the config ("sales", "payments")
    pub name: String,

    /// Source table the tuples came from
    pub source_table: String,

    /// Number of INSERT statements that contributed tuples
    pub statements: usize,

    /// Tuples in document order
    pub tuples: Vec<RecordTuple>,
}

impl RecordGroup {
    pub fn new(name: impl Into<String>, source_table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_table: source_table.into(),
            statements: 0,
            tuples: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Render the tuples as a single value list, one tuple per line
    pub fn value_list(&self) -> String {
        self.tuples
            .iter()
            .map(RecordTuple::as_str)
            .collect::<Vec<_>>()
            .join(",\n")
    }
}
