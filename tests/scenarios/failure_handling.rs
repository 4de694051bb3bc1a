//! Runs that must stop without touching the output file

use crate::helpers::*;
use dump_migrate::execution::StageEvent;
use dump_migrate::{MigrationError, Stage};

#[test]
fn test_missing_input_file_names_the_path() {
    let workspace = Workspace::without_dump();
    let (engine, events) = recording_engine(&workspace);

    let err = engine.run_at(fixed_timestamp()).unwrap_err();
    assert!(matches!(err, MigrationError::MissingInputFile { .. }));
    assert!(err.to_string().contains("missing.sql"));
    assert!(!workspace.output.exists());

    let events = events.lock().unwrap();
    assert!(events.iter().any(|event| matches!(
        event,
        StageEvent::RunFailed { stage: Stage::Load, error } if error.contains("missing.sql")
    )));
}

#[test]
fn test_missing_sales_table() {
    let workspace = Workspace::with_dump(&insert("pagos", &[payment(10, "2025-01-10")]));

    let err = workspace.engine().run_at(fixed_timestamp()).unwrap_err();
    assert!(matches!(err, MigrationError::PatternNotFound { ref table } if table == "comprasb"));
    assert!(!workspace.output.exists());
}

#[test]
fn test_existing_output_left_alone_on_failure() {
    let workspace = Workspace::with_dump(&insert("comprasb", &[sale(1, "2025-09-01")]));
    std::fs::write(&workspace.output, "previous run").unwrap();

    assert!(workspace.engine().run_at(fixed_timestamp()).is_err());
    assert_eq!(workspace.output_text(), "previous run");
}

#[test]
fn test_unterminated_tuple_is_malformed() {
    let dump = [
        insert("comprasb", &[sale(1, "2025-09-01")]),
        "INSERT INTO `pagos` VALUES (2006,'MABEL','2025-08-15';\n".to_string(),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);

    let err = workspace.engine().run_at(fixed_timestamp()).unwrap_err();
    assert!(matches!(err, MigrationError::MalformedStatement { ref table, .. } if table == "pagos"));
    assert!(!workspace.output.exists());
}

#[test]
fn test_invalid_utf8_is_a_decode_error() {
    let workspace = Workspace::without_dump();
    std::fs::write(&workspace.input, [0x49, 0x4e, 0xff, 0xfe, 0x3b]).unwrap();

    let err = workspace.engine().run_at(fixed_timestamp()).unwrap_err();
    assert!(matches!(err, MigrationError::Decode { .. }));
}
