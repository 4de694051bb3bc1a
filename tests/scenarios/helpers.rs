//! Test utility functions for dump-migrate scenarios

use chrono::{NaiveDate, NaiveDateTime};
use dump_migrate::core::MigrationConfig;
use dump_migrate::execution::{MigrationEngine, StageEvent};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A scratch directory holding one dump and the output path
pub struct Workspace {
    pub dir: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn with_dump(dump: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("tiendaNew(2).sql");
        let output = dir.path().join("historical_data_complete.sql");
        std::fs::write(&input, dump).expect("write dump");
        Self { dir, input, output }
    }

    /// A workspace whose dump file was never created
    pub fn without_dump() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("missing.sql");
        let output = dir.path().join("historical_data_complete.sql");
        Self { dir, input, output }
    }

    pub fn config(&self) -> MigrationConfig {
        MigrationConfig::with_paths(&self.input, &self.output)
    }

    pub fn engine(&self) -> MigrationEngine {
        MigrationEngine::new(self.config()).expect("valid config")
    }

    pub fn output_text(&self) -> String {
        std::fs::read_to_string(&self.output).expect("output file")
    }
}

/// Engine plus a log of every event it published
pub fn recording_engine(workspace: &Workspace) -> (MigrationEngine, Arc<Mutex<Vec<StageEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let mut engine = workspace.engine();
    engine.add_event_handler(move |event| sink.lock().unwrap().push(event.clone()));
    (engine, events)
}

pub fn fixed_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 14)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap()
}

/// Sales tuple in the comprasb column layout
pub fn sale(id: u32, date: &str) -> String {
    format!(
        "({},1,12115,'FRANCISCA','MORENO','VARIOS',-12.5,1,-12.5,-12.5,'{}',3,1)",
        id, date
    )
}

/// Payment tuple in the pagos column layout
pub fn payment(id: u32, date: &str) -> String {
    format!("(2006,'MABEL','PACHECO','{}','EFECTIVO',50.00,{},3,1)", date, id)
}

/// `INSERT INTO `table` VALUES` with one tuple per line
pub fn insert(table: &str, rows: &[String]) -> String {
    format!("INSERT INTO `{}` VALUES\n{};\n", table, rows.join(",\n"))
}

/// Insert statement lines of the output document
pub fn value_rows<'a>(document: &'a str, target_table: &str) -> Vec<&'a str> {
    let header = format!("INSERT INTO {} ", target_table);
    let mut lines = document.lines();
    for line in lines.by_ref() {
        if line.starts_with(&header) {
            break;
        }
    }
    let mut rows = Vec::new();
    for line in lines {
        rows.push(line);
        if line.ends_with(';') {
            break;
        }
    }
    rows
}
