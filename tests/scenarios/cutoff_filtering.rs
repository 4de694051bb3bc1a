//! Date cutoff behaviour

use crate::helpers::*;
use chrono::NaiveDate;

#[test]
fn test_cutoff_day_itself_is_excluded() {
    let dump = [
        insert(
            "comprasb",
            &[
                sale(1, "2025-09-30"),
                sale(2, "2025-10-01"),
                sale(3, "2025-10-02"),
            ],
        ),
        insert("pagos", &[payment(10, "2025-10-01")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);

    let output = workspace.engine().run_at(fixed_timestamp()).unwrap();
    let sales = output.summary.group("sales").unwrap();
    assert_eq!(sales.retained, 1);
    assert_eq!(sales.excluded, 2);
    assert!(output.document.contains("'2025-09-30'"));
    assert!(!output.document.contains("'2025-10-01',3,1)"));

    assert_eq!(output.summary.group("payments").unwrap().retained, 0);
    assert!(output
        .document
        .contains("-- Sin registros de pagos anteriores a la fecha de corte"));
    assert!(!output.document.contains("INSERT INTO historical_payments"));
}

#[test]
fn test_rows_without_a_valid_date_are_kept() {
    let dump = [
        "INSERT INTO `comprasb` VALUES\n".to_string(),
        "(1,1,12115,'A','B','VARIOS',1,1,1,1,NULL,3,1),\n".to_string(),
        "(2,1,12115,'A','B','VARIOS',1,1,1,1,'2025-13-45',3,1),\n".to_string(),
        "(3,1,12115,'A','B','VARIOS',1,1,1,1,'2026-01-01',3,1);\n".to_string(),
        insert("pagos", &[payment(10, "2025-01-10")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);

    let output = workspace.engine().run_at(fixed_timestamp()).unwrap();
    let sales = output.summary.group("sales").unwrap();
    assert_eq!(sales.retained, 2);
    assert_eq!(sales.dated_retained, 0);
    assert_eq!(sales.excluded, 1);
    assert_eq!(sales.undated, 1);
    assert_eq!(sales.unparseable, 1);
    assert!(output.document.contains("'2025-13-45'"));
    assert!(output.document.contains("1,1,1,1,NULL,3,1)"));

    // Kept rows without a usable date are not reported as imported
    assert!(output.document.contains("-- Registros de ventas: 0\n"));
    assert!(output.document.contains("-- >> 0 ventas historicas importadas\n"));
}

#[test]
fn test_configured_cutoff_is_used() {
    let dump = [
        insert("comprasb", &[sale(1, "2024-12-31"), sale(2, "2025-01-01")]),
        insert("pagos", &[payment(10, "2025-01-10")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);
    let mut config = workspace.config();
    config.cutoff = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let engine = dump_migrate::MigrationEngine::new(config).unwrap();

    let output = engine.run_at(fixed_timestamp()).unwrap();
    assert_eq!(output.summary.group("sales").unwrap().retained, 1);
    assert_eq!(output.summary.group("payments").unwrap().retained, 0);
    assert!(output.document.contains("-- >> Datos filtrados: anteriores a enero 2025"));
}

#[test]
fn test_first_date_in_tuple_decides() {
    // The row carries a later date in a text column after the purchase date
    let dump = [
        "INSERT INTO `comprasb` VALUES\n".to_string(),
        "(1,1,12115,'A','B','VARIOS',1,1,1,1,'2025-09-01',3,'2030-01-01');\n".to_string(),
        insert("pagos", &[payment(10, "2025-01-10")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);

    let output = workspace.engine().run_at(fixed_timestamp()).unwrap();
    assert_eq!(output.summary.group("sales").unwrap().retained, 1);
}

#[test]
fn test_multiline_string_is_one_record() {
    let dump = [
        "INSERT INTO `comprasb` VALUES\n".to_string(),
        "(1,1,12115,'A','first line\nsecond (line) 2030-01-01','VARIOS',1,1,1,1,'2025-09-01',3,1),\n"
            .to_string(),
        "(2,1,12115,'A','B','VARIOS',1,1,1,1,'2025-11-01',3,1);\n".to_string(),
        insert("pagos", &[payment(10, "2025-01-10")]),
    ]
    .concat();
    let workspace = Workspace::with_dump(&dump);

    let output = workspace.engine().run_at(fixed_timestamp()).unwrap();
    let sales = output.summary.group("sales").unwrap();
    assert_eq!(sales.found, 2);
    assert_eq!(sales.retained, 1);
    assert!(output.document.contains("first line\nsecond (line) 2030-01-01"));
}
