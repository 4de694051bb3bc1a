//! Top-level statement scanner for MySQL dumps
//!
//! Splits a dump into statements at `;`, skipping over everything that can
//! legally contain a `;` without ending the statement: string literals,
//! quoted identifiers and comments. All delimiters are ASCII, so byte
//! offsets always land on `char` boundaries.

/// One top-level statement, without its terminating `;`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    /// Statement source text
    pub text: &'a str,

    /// Byte offset of the first character in the dump
    pub offset: usize,

    /// False when the dump ended before a `;` was seen
    pub terminated: bool,
}

/// Iterator over the statements of a dump
pub struct StatementScanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> StatementScanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for StatementScanner<'a> {
    type Item = Statement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.src.as_bytes();

        loop {
            self.pos = skip_trivia(bytes, self.pos);
            if self.pos >= bytes.len() {
                return None;
            }

            let start = self.pos;
            let mut pos = start;
            while pos < bytes.len() {
                match bytes[pos] {
                    b';' => break,
                    quote @ (b'\'' | b'"' | b'`') => {
                        pos = skip_quoted(bytes, pos, quote).unwrap_or(bytes.len());
                    }
                    _ if comment_len(bytes, pos) > 0 => pos += comment_len(bytes, pos),
                    _ => pos += 1,
                }
            }

            let terminated = pos < bytes.len();
            self.pos = if terminated { pos + 1 } else { pos };

            // A bare `;` (e.g. after a `/*!40000 ... */` comment) is not a statement
            if pos == start {
                continue;
            }

            return Some(Statement {
                text: self.src[start..pos].trim_end(),
                offset: start,
                terminated,
            });
        }
    }
}

/// 1-based line number of a byte offset
pub fn line_of(src: &str, offset: usize) -> usize {
    src.as_bytes()[..offset.min(src.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Skip whitespace and comments, returning the next significant offset
pub(crate) fn skip_trivia(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        match comment_len(bytes, pos) {
            0 => break,
            len => pos += len,
        }
    }
    pos
}

/// Length of the comment starting at `pos`, or 0 if none starts there
///
/// Recognizes `-- ` (dash dash followed by whitespace or end of input),
/// `#` line comments and `/* ... */` block comments, MySQL's
/// `/*!40101 ... */` conditional comments included. An unterminated block
/// comment runs to the end of input.
pub(crate) fn comment_len(bytes: &[u8], pos: usize) -> usize {
    let rest = &bytes[pos..];
    let line_comment = match rest {
        [b'-', b'-'] => true,
        [b'-', b'-', next, ..] => next.is_ascii_whitespace(),
        [b'#', ..] => true,
        _ => false,
    };
    if line_comment {
        return rest
            .iter()
            .position(|&b| b == b'\n')
            .map(|nl| nl + 1)
            .unwrap_or(rest.len());
    }

    if rest.starts_with(b"/*") {
        return rest[2..]
            .windows(2)
            .position(|w| w == b"*/")
            .map(|end| end + 4)
            .unwrap_or(rest.len());
    }

    0
}

/// Skip a quoted run starting at `pos` (which holds the opening quote)
///
/// Returns the offset just past the closing quote, or `None` if the input
/// ends first. A doubled quote is an escaped quote. Inside `'` and `"`
/// strings a backslash escapes the next byte, as MySQL writes them.
pub(crate) fn skip_quoted(bytes: &[u8], pos: usize, quote: u8) -> Option<usize> {
    let backslash_escapes = quote != b'`';
    let mut i = pos + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if backslash_escapes && b == b'\\' {
            i += 2;
            continue;
        }
        if b == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return Some(i + 1);
        }
        i += 1;
    }
    None
}
