//! Migration execution engine

pub mod emitter;
pub mod engine;

pub use emitter::{format_count, render_document, write_document, DocumentSection};
pub use engine::{EventHandler, MigrationEngine, RunOutput, StageEvent};
