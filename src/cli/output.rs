//! CLI output formatting

use crate::{
    core::{GroupSummary, RunSummary, Stage},
    dump::TableInventory,
    execution::{format_count, StageEvent},
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a spinner for the running stage
pub fn create_stage_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Spinner message while a stage runs
pub fn stage_message(stage: Stage) -> &'static str {
    match stage {
        Stage::Load => "Reading dump...",
        Stage::Extract => "Extracting record groups...",
        Stage::Filter => "Filtering by cutoff date...",
        Stage::Convert => "Converting MySQL syntax to PostgreSQL...",
        Stage::Emit => "Writing SQL file...",
    }
}

/// Format a stage event for display
///
/// Returns `None` for events that only drive the spinner.
pub fn format_stage_event(event: &StageEvent) -> Option<String> {
    let line = match event {
        StageEvent::RunStarted { input, cutoff } => format!(
            "{} Extracting historical data from {} (before {})",
            ROCKET,
            style(input.display()).bold(),
            style(cutoff).cyan()
        ),
        StageEvent::StageStarted { .. } => return None,
        StageEvent::DumpLoaded { bytes, inserts } => format!(
            "{} Read {} bytes, {} INSERT statements",
            INFO,
            style(format_count(*bytes)).cyan(),
            style(format_count(*inserts)).cyan()
        ),
        StageEvent::GroupExtracted {
            group,
            statements,
            records,
        } => format!(
            "{} Found {} {} records in {} statement(s)",
            CHECK,
            style(format_count(*records)).cyan(),
            style(group).bold(),
            statements
        ),
        StageEvent::GroupFiltered { group, stats } => {
            let mut line = format!(
                "{} {} {} records kept, {} dropped",
                CHECK,
                style(format_count(stats.retained)).green(),
                style(group).bold(),
                style(format_count(stats.excluded)).dim()
            );
            if stats.undated + stats.unparseable > 0 {
                line.push_str(&format!(
                    " ({} undated, {} with unparseable dates)",
                    stats.undated, stats.unparseable
                ));
            }
            line
        }
        StageEvent::GroupConverted { group } => {
            format!("{} Converted {} to PostgreSQL", CHECK, style(group).bold())
        }
        StageEvent::Warning { message } => format!("{} {}", WARN, style(message).yellow()),
        StageEvent::DocumentWritten { path, .. } => format!(
            "{} Completed! File generated: {}",
            CHECK,
            style(path.display()).bold()
        ),
        StageEvent::DocumentPlanned { path, bytes } => format!(
            "{} Dry run: {} bytes would be written to {}",
            INFO,
            format_count(*bytes),
            style(path.display()).bold()
        ),
        StageEvent::RunFailed { stage, error } => format!(
            "{} ERROR during {}: {}",
            CROSS,
            style(stage).red(),
            style(error).red()
        ),
    };
    Some(line)
}

/// One line per group
pub fn format_group_summary(group: &GroupSummary) -> String {
    let mut line = format!(
        "  {} -> {}: {} of {} records imported ({} statement(s))",
        style(&group.name).bold(),
        style(&group.target_table).cyan(),
        style(format_count(group.dated_retained)).green(),
        format_count(group.found),
        group.statements
    );
    let undated = group.retained - group.dated_retained;
    if undated > 0 {
        line.push_str(&format!(", {} more kept without a usable date", format_count(undated)));
    }
    line
}

/// Closing lines: file size and how to load the result
pub fn format_instructions(summary: &RunSummary, schema_script: &str) -> String {
    format!(
        "{} File size: {:.1} MB\n\n{} Next steps:\n  1. Run {} first (tables only)\n  2. Then run {} (all data)",
        INFO,
        summary.output_megabytes(),
        INFO,
        style(schema_script).bold(),
        style(summary.output_path.display()).bold()
    )
}

/// Table inventory row
pub fn format_inventory_row(entry: &TableInventory) -> String {
    let mut line = format!(
        "  {} {} statement(s), {} tuples",
        style(&entry.table).bold(),
        style(entry.statements).cyan(),
        style(format_count(entry.tuples)).cyan()
    );
    if entry.malformed > 0 {
        line.push_str(&format!(" {}", style(format!("({} malformed)", entry.malformed)).red()));
    }
    line
}
