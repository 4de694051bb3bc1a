//! Cutoff-date filter
//!
//! A record survives unless its first `'YYYY-MM-DD'` literal is a valid
//! date on or after the cutoff. Records without a date, or with a date
//! that is not a real calendar day, are kept but not counted as
//! imported: only dated records before the cutoff are.

use crate::core::{DateToken, RecordGroup};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the filter did to one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    pub scanned: usize,
    pub retained: usize,
    /// Kept records whose date parsed and falls before the cutoff
    pub dated_retained: usize,
    pub excluded: usize,
    pub undated: usize,
    pub unparseable: usize,
}

impl FilterStats {
    fn record(&mut self, token: &DateToken, retained: bool) {
        self.scanned += 1;
        if retained {
            self.retained += 1;
        } else {
            self.excluded += 1;
        }
        match token {
            DateToken::Absent => self.undated += 1,
            DateToken::Unparseable(_) => self.unparseable += 1,
            DateToken::Valid(_) if retained => self.dated_retained += 1,
            DateToken::Valid(_) => {}
        }
    }
}

/// Drop the tuples of `group` dated on or after `cutoff`, keeping order
pub fn filter_records(mut group: RecordGroup, cutoff: NaiveDate) -> (RecordGroup, FilterStats) {
    let mut stats = FilterStats::default();

    group.tuples.retain(|tuple| {
        let token = tuple.date_token();
        let keep = token.is_retained(cutoff);
        if let DateToken::Unparseable(raw) = &token {
            debug!("{}: keeping record with unparseable date '{}'", group.name, raw);
        }
        stats.record(&token, keep);
        keep
    });

    debug!(
        "{}: {} of {} records before {}",
        group.name, stats.retained, stats.scanned, cutoff
    );
    (group, stats)
}

/// Line-oriented variant for a raw value-list text
///
/// Each physical line is one record. Returns the kept lines joined with
/// `\n` and how many of them carry a valid date before the cutoff;
/// undated and unparseable lines are kept without being counted.
pub fn filter_value_lines(values: &str, cutoff: NaiveDate) -> (String, usize) {
    let mut count = 0;
    let kept: Vec<&str> = values
        .split('\n')
        .filter(|line| {
            let token = DateToken::scan(line);
            if matches!(token, DateToken::Valid(date) if date < cutoff) {
                count += 1;
            }
            token.is_retained(cutoff)
        })
        .collect();
    (kept.join("\n"), count)
}
