//! Tables split over several INSERT statements

use crate::helpers::*;
use dump_migrate::execution::StageEvent;

#[test]
fn test_payments_concatenated_in_document_order() {
    let dump = [
        insert("comprasb", &[sale(1, "2025-09-01")]),
        insert("pagos", &[payment(10, "2025-01-10"), payment(11, "2025-02-10")]),
        "-- a comment between statements\n".to_string(),
        insert("pagos", &[payment(12, "2025-03-10")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);

    let output = workspace.engine().run_at(fixed_timestamp()).unwrap();
    let payments = output.summary.group("payments").unwrap();
    assert_eq!(payments.statements, 2);
    assert_eq!(payments.found, 3);
    assert_eq!(payments.retained, 3);

    let rows = value_rows(&output.document, "historical_payments");
    assert_eq!(rows.len(), 3);
    assert!(rows[0].contains(",10,3,1)"));
    assert!(rows[1].contains(",11,3,1)"));
    assert!(rows[2].contains(",12,3,1)"));
    assert!(rows[2].ends_with(");"));
}

#[test]
fn test_similarly_named_table_not_matched() {
    let dump = [
        insert("comprasb", &[sale(1, "2025-09-01")]),
        insert("pagos_old", &[payment(99, "2020-01-01")]),
        insert("pagos", &[payment(10, "2025-01-10")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);

    let output = workspace.engine().run_at(fixed_timestamp()).unwrap();
    assert_eq!(output.summary.group("payments").unwrap().found, 1);
    assert!(!output.document.contains(",99,3,1)"));
}

#[test]
fn test_second_sales_statement_ignored_with_warning() {
    let dump = [
        insert("comprasb", &[sale(1, "2025-09-01")]),
        insert("comprasb", &[sale(2, "2025-09-02")]),
        insert("pagos", &[payment(10, "2025-01-10")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);
    let (engine, events) = recording_engine(&workspace);

    let output = engine.run_at(fixed_timestamp()).unwrap();
    assert_eq!(output.summary.group("sales").unwrap().found, 1);

    let warnings: Vec<String> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|event| match event {
            StageEvent::Warning { message } => Some(message.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("comprasb"));
}

#[test]
fn test_semicolons_inside_strings_do_not_split_statements() {
    let dump = [
        "INSERT INTO `comprasb` VALUES\n".to_string(),
        "(1,1,12115,'A; B','O\\'NEIL','VARIOS',-12.5,1,-12.5,-12.5,'2025-09-01',3,1);\n"
            .to_string(),
        insert("pagos", &[payment(10, "2025-01-10")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);

    let output = workspace.engine().run_at(fixed_timestamp()).unwrap();
    let rows = value_rows(&output.document, "historical_sales");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains("'A; B'"));
    assert!(rows[0].contains("'O\\'NEIL'"));
}
