//! Migration configuration from YAML

use crate::core::error::{MigrationError, MigrationResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_PATH: &str = "../tiendaNew(2).sql";
pub const DEFAULT_OUTPUT_PATH: &str = "historical_data_complete.sql";
pub const DEFAULT_SCHEMA_SCRIPT: &str = "create_historical_tables_complete.sql";

/// Column names the source dump spells in mixed case
const DEFAULT_RENAMES: &[(&str, &str)] = &[
    ("codCom", "codcom"),
    ("codArt", "codart"),
    ("codCli", "codcli"),
    ("nombreCli", "nombrecli"),
    ("apellidosCli", "apellidoscli"),
    ("nombreArt", "nombreart"),
    ("fechaCom", "fechacom"),
];

const SALES_COLUMNS: &[&str] = &[
    "codcom",
    "codart",
    "codcli",
    "nombrecli",
    "apellidoscli",
    "nombreart",
    "precio",
    "cantidad",
    "subtotal",
    "total",
    "fechacom",
    "vista",
    "cod_user",
];

const PAYMENT_COLUMNS: &[&str] = &[
    "cod_cliente_p",
    "nombre_c_p",
    "apellidos_c_p",
    "fecha_pago",
    "tipo_de_pago",
    "cantidad_pago",
    "cod_pago",
    "vista",
    "cod_user",
];

/// One `from -> to` identifier rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRename {
    pub from: String,
    pub to: String,
}

/// Top-level migration configuration loaded from YAML
///
/// Every field has a default, so an empty document (or no file at all)
/// reproduces the historical extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Source dump to read
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Output SQL file, overwritten on every run
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Records dated on or after this day are dropped
    #[serde(default = "default_cutoff")]
    pub cutoff: NaiveDate,

    /// Schema script the operator must run before the generated file
    #[serde(default = "default_schema_script")]
    pub schema_script: String,

    /// Identifier rewrites, applied in declaration order
    #[serde(default = "default_renames")]
    renames: Mapping,

    /// Record groups to extract, emitted in this order
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupConfig>,
}

/// A record group: one source table mapped onto one target table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Short name used in logs and summaries ("sales", "payments")
    pub name: String,

    /// Banner printed above the group's insert statement
    #[serde(default)]
    pub title: Option<String>,

    /// Noun used in the document header ("Registros de ventas")
    #[serde(default)]
    pub label: Option<String>,

    /// Summary phrase after the count ("ventas historicas importadas")
    #[serde(default)]
    pub imported: Option<String>,

    /// Table name in the source dump
    pub source_table: String,

    /// Table name in the target database
    pub target_table: String,

    /// Explicit target column list
    pub columns: Vec<String>,

    /// How many source statements feed this group
    #[serde(default)]
    pub mode: ExtractionMode,
}

/// How many matching INSERT statements a group is built from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Exactly one statement is expected; extras are ignored with a warning
    #[default]
    First,
    /// The table is split over several statements; concatenate them all
    All,
}

impl GroupConfig {
    /// Banner title, falling back to the upper-cased group name
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| self.name.to_uppercase())
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Summary phrase, falling back to "registros de <label> importados"
    pub fn imported_phrase(&self) -> String {
        self.imported
            .clone()
            .unwrap_or_else(|| format!("registros de {} importados", self.display_label()))
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or(NaiveDate::MIN)
}

fn default_schema_script() -> String {
    DEFAULT_SCHEMA_SCRIPT.to_string()
}

fn default_renames() -> Mapping {
    DEFAULT_RENAMES
        .iter()
        .map(|(from, to)| (Value::String(from.to_string()), Value::String(to.to_string())))
        .collect()
}

fn default_groups() -> Vec<GroupConfig> {
    vec![
        GroupConfig {
            name: "sales".to_string(),
            title: Some("VENTAS HISTORICAS COMPLETAS".to_string()),
            label: Some("ventas".to_string()),
            imported: Some("ventas historicas importadas".to_string()),
            source_table: "comprasb".to_string(),
            target_table: "historical_sales".to_string(),
            columns: SALES_COLUMNS.iter().map(|c| c.to_string()).collect(),
            mode: ExtractionMode::First,
        },
        GroupConfig {
            name: "payments".to_string(),
            title: Some("PAGOS HISTORICOS COMPLETOS".to_string()),
            label: Some("pagos".to_string()),
            imported: Some("pagos historicos importados".to_string()),
            source_table: "pagos".to_string(),
            target_table: "historical_payments".to_string(),
            columns: PAYMENT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            mode: ExtractionMode::All,
        },
    ]
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            cutoff: default_cutoff(),
            schema_script: default_schema_script(),
            renames: default_renames(),
            groups: default_groups(),
        }
    }
}

impl MigrationConfig {
    /// Default configuration reading `input` and writing `output`
    pub fn with_paths(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input.into(),
            output_path: output.into(),
            ..Self::default()
        }
    }

    /// Load migration configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> MigrationResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| MigrationError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse migration configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> MigrationResult<Self> {
        // An empty document deserializes as null, not as an empty mapping
        let config: MigrationConfig = if yaml.trim().is_empty() {
            MigrationConfig::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| MigrationError::Config(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the migration configuration
    pub fn validate(&self) -> MigrationResult<()> {
        if self.groups.is_empty() {
            return Err(MigrationError::Config("no record groups defined".to_string()));
        }

        let mut seen_names = HashSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(MigrationError::Config("group with empty name".to_string()));
            }
            if !seen_names.insert(group.name.as_str()) {
                return Err(MigrationError::Config(format!(
                    "duplicate group name: {}",
                    group.name
                )));
            }
            if group.source_table.trim().is_empty() || group.target_table.trim().is_empty() {
                return Err(MigrationError::Config(format!(
                    "group '{}' needs both source_table and target_table",
                    group.name
                )));
            }
            if group.columns.is_empty() {
                return Err(MigrationError::Config(format!(
                    "group '{}' has an empty column list",
                    group.name
                )));
            }
        }

        self.rename_rules()?;
        Ok(())
    }

    /// Identifier rewrites in declaration order
    pub fn rename_rules(&self) -> MigrationResult<Vec<IdentifierRename>> {
        self.renames
            .iter()
            .map(|(from, to)| match (from.as_str(), to.as_str()) {
                (Some(from), Some(to)) if !from.is_empty() => Ok(IdentifierRename {
                    from: from.to_string(),
                    to: to.to_string(),
                }),
                _ => Err(MigrationError::Config(format!(
                    "rename entries must map a non-empty string to a string, got {:?} -> {:?}",
                    from, to
                ))),
            })
            .collect()
    }

    /// Replace the rename table
    pub fn set_renames<I, K, V>(&mut self, renames: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.renames = renames
            .into_iter()
            .map(|(from, to)| (Value::String(from.into()), Value::String(to.into())))
            .collect();
    }

    /// Look up a group by name
    pub fn group(&self, name: &str) -> Option<&GroupConfig> {
        self.groups.iter().find(|g| g.name == name)
    }
}
