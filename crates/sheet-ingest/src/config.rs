//! Import configuration: the column schema, type defaults and drift policy.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sheet_model::{ColumnHandling, ColumnSchema, ModelError, TypeConfig};
use sheet_validate::{SchemaIssue, lint_schema};
use tracing::{info, warn};

use crate::error::{IngestError, Result};

/// Everything an import session is configured with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportConfig {
    pub columns: Vec<ColumnSchema>,
    pub type_config: TypeConfig,
    pub column_handling: ColumnHandling,
}

impl ImportConfig {
    /// Names of the declared columns, in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn lint(&self) -> Vec<SchemaIssue> {
        lint_schema(&self.columns, &self.type_config)
    }
}

/// A loaded configuration with the non-fatal problems found in it.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ImportConfig,
    pub issues: Vec<SchemaIssue>,
}

/// Load an import configuration from a JSON file.
///
/// Duplicate column names are an error. Other schema problems are logged and
/// returned alongside the configuration; validation tolerates them.
pub fn load_config(path: &Path) -> Result<LoadedConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    parse_config(path, &content)
}

/// Parse configuration JSON. `path` is used for error messages.
pub fn parse_config(path: &Path, content: &str) -> Result<LoadedConfig> {
    let config: ImportConfig =
        serde_json::from_str(content).map_err(|source| IngestError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    let (fatal, issues): (Vec<_>, Vec<_>) =
        config.lint().into_iter().partition(SchemaIssue::is_fatal);
    if let Some(SchemaIssue::DuplicateColumn { column }) = fatal.into_iter().next() {
        return Err(IngestError::InvalidConfig {
            path: path.to_path_buf(),
            source: ModelError::DuplicateColumn { name: column },
        });
    }

    for issue in &issues {
        warn!(path = %path.display(), "{issue}");
    }
    info!(
        path = %path.display(),
        columns = config.columns.len(),
        policy = config.column_handling.label(),
        issues = issues.len(),
        "loaded import configuration"
    );

    Ok(LoadedConfig { config, issues })
}
