use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use sheet_ingest::{load_config, read_csv_table};
use sheet_output::{write_csv, write_report};
use sheet_validate::{apply_invalid_handling, run_import};

use crate::cli::{CheckArgs, SchemaArgs};
use crate::types::{CheckOutcome, SchemaOutcome};

pub fn run_check(args: &CheckArgs) -> Result<CheckOutcome> {
    let span = info_span!("check", input = %args.input.display());
    let _guard = span.enter();

    let loaded = load_config(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    let mut config = loaded.config;
    if let Some(policy) = args.column_handling {
        config.column_handling = policy.into();
    }

    let table = read_csv_table(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        policy = config.column_handling.label(),
        "loaded input"
    );

    let report = run_import(
        &table.headers,
        &table.rows,
        &config.columns,
        &config.type_config,
        config.column_handling,
    );

    let handled = match (args.apply_handling, report.cleaned_rows(), &report.validation) {
        (true, Some(rows), Some(validation)) => {
            Some(apply_invalid_handling(rows, &config.columns, validation))
        }
        (true, ..) => {
            warn!("import blocked before validation; invalid-data handling not applied");
            None
        }
        (false, ..) => None,
    };

    let mut outcome = CheckOutcome {
        input: args.input.clone(),
        rows: table.row_count(),
        config,
        config_issues: loaded.issues,
        report,
        handled,
        output: None,
        report_path: None,
    };

    if let Some(path) = &args.report {
        write_report(path, &outcome.report)
            .with_context(|| format!("write report {}", path.display()))?;
        outcome.report_path = Some(path.clone());
    }

    if let Some(path) = &args.output {
        let rows = match &outcome.handled {
            Some(handled) => Some(handled.rows.as_slice()),
            None => outcome.report.cleaned_rows(),
        };
        match rows {
            Some(rows) if outcome.is_importable() => {
                write_csv(path, rows, &outcome.config.columns, &outcome.config.type_config)
                    .with_context(|| format!("write output {}", path.display()))?;
                outcome.output = Some(path.clone());
            }
            _ => warn!(path = %path.display(), "import blocked; cleaned rows not written"),
        }
    }

    Ok(outcome)
}

pub fn run_schema(args: &SchemaArgs) -> Result<SchemaOutcome> {
    let loaded = load_config(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    Ok(SchemaOutcome {
        config: loaded.config,
        issues: loaded.issues,
    })
}
