//! INSERT statement header parsing and value tuple splitting

use crate::dump::scanner::{skip_quoted, skip_trivia, Statement, StatementScanner};

/// A parsed `INSERT ... VALUES` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement<'a> {
    /// Target table, unquoted and without schema qualifier
    pub table: String,

    /// Column list, if the statement names one
    pub columns: Option<Vec<String>>,

    /// Everything after the `VALUES` keyword
    pub values: &'a str,

    /// Byte offset of the statement in the dump
    pub offset: usize,

    /// False when the dump ended before the closing `;`
    pub terminated: bool,
}

/// Value tuples split out of a `VALUES` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueList<'a> {
    /// Tuples, parentheses included, in source order
    pub tuples: Vec<&'a str>,

    /// Text after the last tuple (e.g. `ON DUPLICATE KEY UPDATE ...`)
    pub trailing: Option<&'a str>,
}

const MODIFIERS: &[&str] = &["LOW_PRIORITY", "DELAYED", "HIGH_PRIORITY", "IGNORE"];

/// Collect every `INSERT ... VALUES` statement in a dump
pub fn scan_inserts(dump: &str) -> Vec<InsertStatement<'_>> {
    StatementScanner::new(dump)
        .filter_map(|stmt| parse_insert(&stmt))
        .collect()
}

/// Parse the header of an insert statement
///
/// Returns `None` for anything that is not `INSERT [modifiers] [INTO]
/// table [(columns)] VALUES ...`, including `INSERT ... SELECT` and
/// `INSERT ... SET`.
pub fn parse_insert<'a>(stmt: &Statement<'a>) -> Option<InsertStatement<'a>> {
    let text = stmt.text;
    let mut cursor = Cursor::new(text);

    cursor.keyword("INSERT")?;
    while MODIFIERS.iter().any(|m| cursor.keyword(m).is_some()) {}
    let _ = cursor.keyword("INTO");

    let mut table = cursor.identifier()?;
    while cursor.punct(b'.') {
        table = cursor.identifier()?;
    }

    let columns = if cursor.peek() == Some(b'(') {
        Some(cursor.column_list()?)
    } else {
        None
    };

    if cursor.keyword("VALUES").is_none() {
        cursor.keyword("VALUE")?;
    }

    Some(InsertStatement {
        table,
        columns,
        values: &text[cursor.pos..],
        offset: stmt.offset,
        terminated: stmt.terminated,
    })
}

impl<'a> InsertStatement<'a> {
    /// Whether this statement targets `table`, ignoring case
    pub fn targets(&self, table: &str) -> bool {
        self.table.eq_ignore_ascii_case(table)
    }

    /// Split the value list into tuples
    pub fn value_list(&self) -> Result<ValueList<'a>, String> {
        split_tuples(self.values)
    }
}

/// Split a `VALUES` list into balanced-parenthesis tuples
///
/// Parentheses and commas inside string literals or quoted identifiers do
/// not count. Fails on an unterminated tuple, a trailing comma, or a list
/// that does not start with `(`.
pub fn split_tuples(values: &str) -> Result<ValueList<'_>, String> {
    let bytes = values.as_bytes();
    let mut tuples = Vec::new();
    let mut pos = skip_trivia(bytes, 0);

    while pos < bytes.len() {
        if bytes[pos] != b'(' {
            if tuples.is_empty() {
                return Err(format!("expected '(' at value list start, found {:?}", bytes[pos] as char));
            }
            return Ok(ValueList {
                tuples,
                trailing: Some(values[pos..].trim_end()),
            });
        }

        let start = pos;
        let end = tuple_end(bytes, start)
            .ok_or_else(|| format!("unterminated tuple #{}", tuples.len() + 1))?;
        tuples.push(&values[start..end]);

        pos = skip_trivia(bytes, end);
        if bytes.get(pos) == Some(&b',') {
            pos = skip_trivia(bytes, pos + 1);
            if pos >= bytes.len() {
                return Err(format!("trailing comma after tuple #{}", tuples.len()));
            }
        } else if pos < bytes.len() {
            return Ok(ValueList {
                tuples,
                trailing: Some(values[pos..].trim_end()),
            });
        }
    }

    if tuples.is_empty() {
        return Err("empty value list".to_string());
    }

    Ok(ValueList { tuples, trailing: None })
}

/// Offset just past the `)` closing the tuple opened at `start`
fn tuple_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = start;
    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            quote @ (b'\'' | b'"' | b'`') => {
                pos = skip_quoted(bytes, pos, quote)?;
                continue;
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Minimal cursor over a statement header
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn skip_trivia(&mut self) {
        self.pos = skip_trivia(self.bytes(), self.pos);
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_trivia();
        self.bytes().get(self.pos).copied()
    }

    fn punct(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `word` case-insensitively if it is the next whole word
    fn keyword(&mut self, word: &str) -> Option<()> {
        self.skip_trivia();
        let rest = &self.bytes()[self.pos..];
        if rest.len() < word.len() || !rest[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            return None;
        }
        if rest.get(word.len()).copied().is_some_and(is_ident_byte) {
            return None;
        }
        self.pos += word.len();
        Some(())
    }

    /// A bare, backtick-quoted or double-quoted identifier, unquoted
    fn identifier(&mut self) -> Option<String> {
        let bytes = self.bytes();
        match self.peek()? {
            quote @ (b'`' | b'"') => {
                let end = skip_quoted(bytes, self.pos, quote)?;
                let inner = &self.text[self.pos + 1..end - 1];
                self.pos = end;
                let q = quote as char;
                Some(inner.replace(&format!("{q}{q}"), &q.to_string()))
            }
            b if is_ident_byte(b) => {
                let start = self.pos;
                while self.pos < bytes.len() && is_ident_byte(bytes[self.pos]) {
                    self.pos += 1;
                }
                Some(self.text[start..self.pos].to_string())
            }
            _ => None,
        }
    }

    /// `( col, col, ... )`
    fn column_list(&mut self) -> Option<Vec<String>> {
        if !self.punct(b'(') {
            return None;
        }
        let mut columns = Vec::new();
        if self.punct(b')') {
            return Some(columns);
        }
        loop {
            columns.push(self.identifier()?);
            if self.punct(b',') {
                continue;
            }
            if self.punct(b')') {
                return Some(columns);
            }
            return None;
        }
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
