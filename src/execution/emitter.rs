//! Output document rendering

use crate::core::{GroupConfig, MigrationError, MigrationResult, RecordGroup};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt::Write as _;
use std::path::Path;

const RULE: &str = "-- =====================================================================";

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// One record group ready to be emitted
#[derive(Debug, Clone, Copy)]
pub struct DocumentSection<'a> {
    pub config: &'a GroupConfig,
    pub group: &'a RecordGroup,

    /// Count reported in the header and summary
    pub imported: usize,
}

/// Compose the output document
///
/// Pure function of its inputs: the same groups, cutoff and timestamp
/// always render the same bytes.
pub fn render_document(
    sections: &[DocumentSection<'_>],
    cutoff: NaiveDate,
    generated_at: NaiveDateTime,
) -> String {
    let mut doc = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(doc, "-- DATOS HISTORICOS COMPLETOS - Generado automaticamente");
    let _ = writeln!(
        doc,
        "-- Fecha de generacion: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    for section in sections {
        let _ = writeln!(
            doc,
            "-- Registros de {}: {}",
            section.config.display_label(),
            format_count(section.imported)
        );
    }

    for section in sections {
        doc.push('\n');
        banner(&mut doc, &section.config.display_title());
        doc.push('\n');
        insert_statement(&mut doc, section);
    }

    doc.push('\n');
    banner(&mut doc, "RESUMEN");
    for section in sections {
        let _ = writeln!(
            doc,
            "-- >> {} {}",
            format_count(section.imported),
            section.config.imported_phrase()
        );
    }
    let _ = writeln!(doc, "-- >> Datos filtrados: anteriores a {}", describe_cutoff(cutoff));
    let _ = writeln!(doc, "-- >> Formato: PostgreSQL compatible");
    let _ = writeln!(doc, "{}", RULE);

    doc
}

/// `2025-10-01` -> `octubre 2025`; any other day is printed as a date
pub fn describe_cutoff(cutoff: NaiveDate) -> String {
    if cutoff.day() == 1 {
        format!("{} {}", MONTHS[cutoff.month0() as usize], cutoff.year())
    } else {
        cutoff.format("%Y-%m-%d").to_string()
    }
}

/// Write the document, replacing any existing file
pub fn write_document<P: AsRef<Path>>(path: P, contents: &str) -> MigrationResult<()> {
    let path = path.as_ref();
    std::fs::write(path, contents).map_err(|e| MigrationError::io(path, e))
}

fn banner(doc: &mut String, title: &str) {
    let _ = writeln!(doc, "{}", RULE);
    let _ = writeln!(doc, "-- {}", title);
    let _ = writeln!(doc, "{}", RULE);
}

fn insert_statement(doc: &mut String, section: &DocumentSection<'_>) {
    let config = section.config;
    if section.group.is_empty() {
        let _ = writeln!(
            doc,
            "-- Sin registros de {} anteriores a la fecha de corte; nada que insertar en {}",
            config.display_label(),
            config.target_table
        );
        return;
    }

    let _ = writeln!(
        doc,
        "INSERT INTO {} ({}) VALUES",
        config.target_table,
        config.columns.join(", ")
    );
    let _ = writeln!(doc, "{};", section.group.value_list());
}

/// `3098` -> `3,098`
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
