use std::path::PathBuf;

use sheet_ingest::ImportConfig;
use sheet_validate::{Gate, HandledRows, ImportReport, SchemaIssue};

/// Everything `check` produced, for the summary and the exit code.
#[derive(Debug)]
pub struct CheckOutcome {
    pub input: PathBuf,
    pub rows: usize,
    pub config: ImportConfig,
    pub config_issues: Vec<SchemaIssue>,
    pub report: ImportReport,
    /// Present when invalid-data handling was applied.
    pub handled: Option<HandledRows>,
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

impl CheckOutcome {
    /// Whether the rows can be imported.
    ///
    /// With handling applied, failing cells in flag, remove and default
    /// columns no longer block; rejected cells still do.
    pub fn is_importable(&self) -> bool {
        match &self.handled {
            Some(handled) => {
                matches!(self.report.blocked_at(), None | Some(Gate::Validation))
                    && !handled.is_blocked()
            }
            None => self.report.is_importable(),
        }
    }
}

/// The loaded schema for `schema`.
#[derive(Debug)]
pub struct SchemaOutcome {
    pub config: ImportConfig,
    pub issues: Vec<SchemaIssue>,
}
