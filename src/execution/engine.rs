//! Migration engine - runs load, extract, filter, convert and emit in order

use crate::{
    core::{GroupSummary, MigrationConfig, MigrationResult, RecordGroup, RunSummary, Stage},
    dump::{extract_group, DumpDocument},
    execution::emitter::{render_document, write_document, DocumentSection},
    transform::{filter_records, DialectConverter, FilterStats},
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Events published while a migration runs
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    RunStarted {
        input: PathBuf,
        cutoff: NaiveDate,
    },
    StageStarted {
        stage: Stage,
    },
    DumpLoaded {
        bytes: usize,
        inserts: usize,
    },
    GroupExtracted {
        group: String,
        statements: usize,
        records: usize,
    },
    GroupFiltered {
        group: String,
        stats: FilterStats,
    },
    GroupConverted {
        group: String,
    },
    Warning {
        message: String,
    },
    DocumentWritten {
        path: PathBuf,
        bytes: usize,
    },
    DocumentPlanned {
        path: PathBuf,
        bytes: usize,
    },
    RunFailed {
        stage: Stage,
        error: String,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&StageEvent) + Send + Sync>;

/// Drives one migration from a validated config
pub struct MigrationEngine {
    config: MigrationConfig,
    converter: DialectConverter,
    event_handlers: Vec<EventHandler>,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub summary: RunSummary,
    pub document: String,
}

struct GroupRun {
    group: RecordGroup,
    summary: GroupSummary,
}

impl MigrationEngine {
    pub fn new(config: MigrationConfig) -> MigrationResult<Self> {
        config.validate()?;
        let converter = DialectConverter::new(config.rename_rules()?);
        Ok(Self {
            config,
            converter,
            event_handlers: Vec::new(),
        })
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&StageEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: StageEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Run the migration, stamping the document with the local time
    pub fn run(&self) -> MigrationResult<RunOutput> {
        self.run_at(Local::now().naive_local())
    }

    /// Run the migration with a fixed generation timestamp
    pub fn run_at(&self, generated_at: NaiveDateTime) -> MigrationResult<RunOutput> {
        self.execute(generated_at, true)
    }

    /// Everything except writing the output file
    pub fn plan(&self) -> MigrationResult<RunOutput> {
        self.plan_at(Local::now().naive_local())
    }

    pub fn plan_at(&self, generated_at: NaiveDateTime) -> MigrationResult<RunOutput> {
        self.execute(generated_at, false)
    }

    fn execute(&self, generated_at: NaiveDateTime, write: bool) -> MigrationResult<RunOutput> {
        let config = &self.config;
        debug!(
            "Starting migration of {} (cutoff {})",
            config.input_path.display(),
            config.cutoff
        );
        self.emit_event(StageEvent::RunStarted {
            input: config.input_path.clone(),
            cutoff: config.cutoff,
        });

        let dump = self.stage(Stage::Load, || DumpDocument::load(&config.input_path))?;
        let inserts = dump.inserts();
        self.emit_event(StageEvent::DumpLoaded {
            bytes: dump.text.len(),
            inserts: inserts.len(),
        });

        // Every group must be found before anything is filtered or written
        let groups = self.stage(Stage::Extract, || {
            let mut groups = Vec::with_capacity(config.groups.len());
            for group_config in &config.groups {
                let extraction = extract_group(&dump.text, &inserts, group_config)?;
                for message in extraction.warnings {
                    debug!("{}", message);
                    self.emit_event(StageEvent::Warning { message });
                }
                let group = extraction.group;
                debug!(
                    "Found {} {} records in {} statement(s)",
                    group.len(),
                    group.name,
                    group.statements
                );
                self.emit_event(StageEvent::GroupExtracted {
                    group: group.name.clone(),
                    statements: group.statements,
                    records: group.len(),
                });
                groups.push(group);
            }
            Ok(groups)
        })?;

        let runs = self.stage(Stage::Filter, || {
            Ok(groups
                .into_iter()
                .zip(&config.groups)
                .map(|(group, group_config)| {
                    let found = group.len();
                    let statements = group.statements;
                    let (group, stats) = filter_records(group, config.cutoff);
                    debug!(
                        "Kept {} of {} {} records ({} dated)",
                        stats.retained, found, group.name, stats.dated_retained
                    );
                    self.emit_event(StageEvent::GroupFiltered {
                        group: group.name.clone(),
                        stats,
                    });
                    GroupRun {
                        summary: GroupSummary {
                            name: group.name.clone(),
                            target_table: group_config.target_table.clone(),
                            statements,
                            found,
                            retained: stats.retained,
                            dated_retained: stats.dated_retained,
                            excluded: stats.excluded,
                            undated: stats.undated,
                            unparseable: stats.unparseable,
                        },
                        group,
                    }
                })
                .collect::<Vec<_>>())
        })?;

        let runs = self.stage(Stage::Convert, || {
            Ok(runs
                .into_iter()
                .map(|run| {
                    let group = self.converter.convert_group(run.group);
                    debug!("Converted {} records of {}", group.len(), group.name);
                    self.emit_event(StageEvent::GroupConverted {
                        group: group.name.clone(),
                    });
                    GroupRun { group, ..run }
                })
                .collect::<Vec<_>>())
        })?;

        let document = self.stage(Stage::Emit, || {
            let sections: Vec<DocumentSection<'_>> = runs
                .iter()
                .zip(&config.groups)
                .map(|(run, group_config)| DocumentSection {
                    config: group_config,
                    group: &run.group,
                    imported: run.summary.dated_retained,
                })
                .collect();
            let document = render_document(&sections, config.cutoff, generated_at);
            if write {
                write_document(&config.output_path, &document)?;
            }
            Ok(document)
        })?;

        let bytes = document.len();
        if write {
            debug!("Wrote {} bytes to {}", bytes, config.output_path.display());
            self.emit_event(StageEvent::DocumentWritten {
                path: config.output_path.clone(),
                bytes,
            });
        } else {
            self.emit_event(StageEvent::DocumentPlanned {
                path: config.output_path.clone(),
                bytes,
            });
        }

        Ok(RunOutput {
            summary: RunSummary {
                input_path: config.input_path.clone(),
                output_path: config.output_path.clone(),
                cutoff: config.cutoff,
                generated_at,
                groups: runs.into_iter().map(|run| run.summary).collect(),
                output_bytes: bytes,
                written: write,
            },
            document,
        })
    }

    /// Run one stage, publishing its start and any failure
    fn stage<T, F>(&self, stage: Stage, body: F) -> MigrationResult<T>
    where
        F: FnOnce() -> MigrationResult<T>,
    {
        self.emit_event(StageEvent::StageStarted { stage });
        body().map_err(|e| {
            debug!("Stage {} failed: {}", stage, e);
            self.emit_event(StageEvent::RunFailed {
                stage,
                error: e.to_string(),
            });
            e
        })
    }
}
