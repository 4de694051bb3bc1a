//! Record filtering and dialect conversion

pub mod dialect;
pub mod filter;

pub use dialect::DialectConverter;
pub use filter::{filter_records, filter_value_lines, FilterStats};
