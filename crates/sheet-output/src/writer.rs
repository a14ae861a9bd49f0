//! Writers for cleaned rows and import reports.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use sheet_model::{ColumnSchema, Row, TypeConfig};
use sheet_validate::ImportReport;
use tracing::info;

use crate::error::{OutputError, Result};
use crate::format::format_cell;

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Output column order: schema columns, then any other keys in the order
/// they first appear in the rows.
pub fn export_columns(rows: &[Row], schema: &[ColumnSchema]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(schema.len());
    for column in schema {
        if !columns.contains(&column.name) {
            columns.push(column.name.clone());
        }
    }
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

/// Write rows as CSV to any writer. Schema columns are formatted by type;
/// undeclared columns are written as read.
pub fn write_csv_to<W: Write>(
    writer: W,
    rows: &[Row],
    schema: &[ColumnSchema],
    config: &TypeConfig,
) -> csv::Result<()> {
    let columns = export_columns(rows, schema);
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&columns)?;
    for row in rows {
        let record = columns.iter().map(|name| {
            let value = row.value(name);
            match schema.iter().find(|column| &column.name == name) {
                Some(column) => format_cell(value, column, config),
                None => value.to_string(),
            }
        });
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write rows as a CSV file, creating parent directories as needed.
pub fn write_csv(
    path: &Path,
    rows: &[Row],
    schema: &[ColumnSchema],
    config: &TypeConfig,
) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv_to(BufWriter::new(file), rows, schema, config).map_err(|source| {
        OutputError::Csv {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), rows = rows.len(), "wrote cleaned rows");
    Ok(())
}

/// Write an import report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &ImportReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| OutputError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "wrote import report");
    Ok(())
}
