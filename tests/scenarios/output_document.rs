//! Shape and stability of the generated document

use crate::helpers::*;
use dump_migrate::{MigrationConfig, MigrationEngine};

fn sample_dump() -> String {
    [
        "-- MySQL dump 10.13\n/*!40101 SET NAMES utf8mb4 */;\n".to_string(),
        "CREATE TABLE `comprasb` (\n  `codCom` int NOT NULL,\n  `fechaCom` date\n);\n"
            .to_string(),
        insert("comprasb", &[sale(1, "2025-09-01"), sale(2, "2025-11-01")]),
        insert("pagos", &[payment(10, "2025-08-15")]),
    ]
    .concat()
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let workspace = Workspace::with_dump(&sample_dump());
    let engine = workspace.engine();

    engine.run_at(fixed_timestamp()).unwrap();
    let first = workspace.output_text();
    engine.run_at(fixed_timestamp()).unwrap();
    let second = workspace.output_text();

    assert_eq!(first, second);
}

#[test]
fn test_written_file_matches_returned_document() {
    let workspace = Workspace::with_dump(&sample_dump());

    let output = workspace.engine().run_at(fixed_timestamp()).unwrap();
    assert!(output.summary.written);
    assert_eq!(output.summary.output_bytes, output.document.len());
    assert_eq!(workspace.output_text(), output.document);
}

#[test]
fn test_document_sections_in_order() {
    let workspace = Workspace::with_dump(&sample_dump());
    let document = workspace.engine().run_at(fixed_timestamp()).unwrap().document;

    let positions: Vec<usize> = [
        "-- DATOS HISTORICOS COMPLETOS - Generado automaticamente",
        "-- Fecha de generacion: 2025-10-14 10:15:00",
        "-- VENTAS HISTORICAS COMPLETAS",
        "INSERT INTO historical_sales (codcom, codart,",
        "-- PAGOS HISTORICOS COMPLETOS",
        "INSERT INTO historical_payments (cod_cliente_p,",
        "-- RESUMEN",
        "-- >> Formato: PostgreSQL compatible",
    ]
    .iter()
    .map(|needle| document.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_yaml_config_drives_the_run() {
    let workspace = Workspace::with_dump(&sample_dump());
    let yaml = format!(
        r#"
input_path: "{}"
output_path: "{}"
cutoff: 2025-12-01
groups:
  - name: sales
    source_table: comprasb
    target_table: archive_sales
    columns: [codcom, rest]
"#,
        workspace.input.display(),
        workspace.output.display()
    );
    let config = MigrationConfig::from_yaml(&yaml).unwrap();
    let output = MigrationEngine::new(config)
        .unwrap()
        .run_at(fixed_timestamp())
        .unwrap();

    assert_eq!(output.summary.groups.len(), 1);
    assert_eq!(output.summary.group("sales").unwrap().retained, 2);
    assert!(output.document.contains("INSERT INTO archive_sales (codcom, rest) VALUES"));
    assert!(output.document.contains("-- Registros de sales: 2\n"));
    assert!(output.document.contains("-- >> 2 registros de sales importados\n"));
    assert!(output.document.contains("-- >> Datos filtrados: anteriores a diciembre 2025"));
    assert!(!output.document.contains("historical_payments"));
}

#[test]
fn test_dry_run_leaves_no_file() {
    let workspace = Workspace::with_dump(&sample_dump());

    let output = workspace.engine().plan_at(fixed_timestamp()).unwrap();
    assert!(!output.summary.written);
    assert!(!workspace.output.exists());
    assert!(output.document.contains("INSERT INTO historical_sales"));
}
