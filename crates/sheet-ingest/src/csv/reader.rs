//! CSV file reading into header names and typed rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sheet_model::{CellValue, Row};
use tracing::{debug, warn};

use super::header::normalize_header;
use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// A decoded sheet: the header row as written and one [`Row`] per record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Header names in file order, trimmed. May contain duplicates.
    pub headers: Vec<String>,
    /// Data rows keyed by header, in file order.
    pub rows: Vec<Row>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::io(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|e| IngestError::io(path, e))?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    // A UTF-8 BOM is acceptable; it is stripped from the first header.
    Ok(())
}

/// Read a CSV file with a single header row.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let data = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    read_csv_bytes(path, &data)
}

/// Parse CSV content already in memory. `path` is used for error messages.
///
/// Blank cells become [`CellValue::Empty`], everything else
/// [`CellValue::Text`] as written. Records shorter than the header are
/// padded with empty cells; fields past the last header are dropped. When a
/// header repeats, the first column with that name supplies the value.
///
/// Records with no content at all (empty lines or only blank fields) are
/// skipped and take no row index. Display row numbers (`index + 2`) then
/// count data records, not lines in the source file, so they drift from the
/// spreadsheet's own line numbers after a blank line.
pub fn read_csv_bytes(path: &Path, data: &[u8]) -> Result<Table> {
    let csv_error = |source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();

    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if let Some(index) = headers.iter().position(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
            index: index + 1,
        });
    }

    let mut rows = Vec::new();
    let mut blank_records = 0usize;
    let mut overflow_records = 0usize;
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|field| field.trim().is_empty()) {
            blank_records += 1;
            continue;
        }
        if record.len() > headers.len() {
            overflow_records += 1;
        }

        let mut row = Row::with_capacity(headers.len());
        for (index, header) in headers.iter().enumerate() {
            if row.contains_key(header) {
                continue;
            }
            row.insert(header.as_str(), cell(record.get(index).unwrap_or_default()));
        }
        rows.push(row);
    }

    if overflow_records > 0 {
        warn!(
            path = %path.display(),
            records = overflow_records,
            "records have more fields than headers; extra fields dropped"
        );
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        blank = blank_records,
        "read CSV"
    );

    Ok(Table { headers, rows })
}

fn cell(field: &str) -> CellValue {
    if field.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::text(field)
    }
}
