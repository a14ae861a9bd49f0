//! The three import gates run in order: headers, schema drift, cells.

use serde::Serialize;
use sheet_model::{
    ColumnHandling, ColumnSchema, HeaderReconciliation, Row, SchemaDriftResult, TypeConfig,
    ValidationResult,
};
use tracing::info;

use crate::drift::resolve_schema;
use crate::headers::reconcile_headers;
use crate::validator::validate;

/// A gate that can block an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Gate {
    Headers,
    SchemaDrift,
    Validation,
}

impl Gate {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Headers => "Headers",
            Self::SchemaDrift => "Schema drift",
            Self::Validation => "Validation",
        }
    }
}

/// Outcome of every gate that ran. Later gates are `None` when an earlier
/// one blocked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub headers: HeaderReconciliation,
    pub drift: Option<SchemaDriftResult>,
    pub validation: Option<ValidationResult>,
}

impl ImportReport {
    /// The first gate that failed, if any.
    pub fn blocked_at(&self) -> Option<Gate> {
        if !self.headers.valid {
            return Some(Gate::Headers);
        }
        match (&self.drift, &self.validation) {
            (Some(drift), _) if !drift.valid => Some(Gate::SchemaDrift),
            (Some(_), Some(validation)) if !validation.valid => Some(Gate::Validation),
            (Some(_), Some(_)) => None,
            (None, _) => Some(Gate::SchemaDrift),
            (Some(_), None) => Some(Gate::Validation),
        }
    }

    pub fn is_importable(&self) -> bool {
        self.blocked_at().is_none()
    }

    /// Rows after drift resolution, when that gate ran.
    pub fn cleaned_rows(&self) -> Option<&[Row]> {
        self.drift.as_ref().map(|drift| drift.cleaned_rows.as_slice())
    }
}

/// Run the header, drift and validation gates, stopping at the first that
/// fails.
pub fn run_import<S: AsRef<str>>(
    file_headers: &[S],
    rows: &[Row],
    schema: &[ColumnSchema],
    config: &TypeConfig,
    policy: ColumnHandling,
) -> ImportReport {
    let headers = reconcile_headers(file_headers, schema);
    if !headers.valid {
        info!(missing = ?headers.missing_required, "import blocked at header check");
        return ImportReport {
            headers,
            drift: None,
            validation: None,
        };
    }

    let drift = resolve_schema(rows, schema, policy);
    if !drift.valid {
        info!(extra = ?drift.extra_columns, "import blocked at schema drift check");
        return ImportReport {
            headers,
            drift: Some(drift),
            validation: None,
        };
    }

    let validation = validate(&drift.cleaned_rows, schema, config);
    info!(
        rows = drift.cleaned_rows.len(),
        diagnostics = validation.diagnostics.len(),
        valid = validation.valid,
        "import checks complete"
    );
    ImportReport {
        headers,
        drift: Some(drift),
        validation: Some(validation),
    }
}
