//! Scenario-based tests for dump-migrate
//!
//! Each scenario writes a small dump into a scratch directory, runs the
//! engine against it and checks the generated document.

mod helpers;

mod cutoff_filtering;
mod failure_handling;
mod multi_statement;
mod output_document;
