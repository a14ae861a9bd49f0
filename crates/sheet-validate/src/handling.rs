//! Per-column handling of cells that failed validation.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use sheet_model::{CellValue, ColumnSchema, InvalidDataHandling, Row, TypeTag, ValidationResult};
use tracing::debug;

/// A cell addressed by zero-based row index and column name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CellRef {
    pub row: usize,
    pub column: String,
}

/// Rows after invalid-data handling, with the cells each policy touched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HandledRows {
    pub rows: Vec<Row>,
    /// Cells left as-is for manual review.
    pub flagged: Vec<CellRef>,
    /// Cells cleared to empty.
    pub removed: Vec<CellRef>,
    /// Cells replaced by the column default.
    pub defaulted: Vec<CellRef>,
    /// Cells whose column rejects invalid data.
    pub rejected: Vec<CellRef>,
}

impl HandledRows {
    /// True when any rejected cell remains; the rows must not be submitted.
    pub fn is_blocked(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Apply each column's [`InvalidDataHandling`] to the cells with
/// diagnostics. Rows are never dropped; a cell with several diagnostics is
/// handled once.
pub fn apply_invalid_handling(
    rows: &[Row],
    schema: &[ColumnSchema],
    validation: &ValidationResult,
) -> HandledRows {
    let columns: HashMap<&str, &ColumnSchema> = schema
        .iter()
        .rev()
        .map(|column| (column.name.as_str(), column))
        .collect();
    let cells: BTreeSet<CellRef> = validation
        .diagnostics
        .iter()
        .filter_map(|diagnostic| {
            Some(CellRef {
                row: diagnostic.row_index()?,
                column: diagnostic.column.clone(),
            })
        })
        .collect();

    let mut handled = HandledRows {
        rows: rows.to_vec(),
        ..HandledRows::default()
    };
    for cell in cells {
        let Some(column) = columns.get(cell.column.as_str()) else {
            continue;
        };
        let Some(row) = handled.rows.get_mut(cell.row) else {
            continue;
        };
        match column.invalid_handling {
            InvalidDataHandling::Flag => handled.flagged.push(cell),
            InvalidDataHandling::Remove => {
                row.insert(cell.column.clone(), CellValue::Empty);
                handled.removed.push(cell);
            }
            InvalidDataHandling::Default => {
                row.insert(cell.column.clone(), default_cell(column));
                handled.defaulted.push(cell);
            }
            InvalidDataHandling::Reject => handled.rejected.push(cell),
        }
    }

    debug!(
        flagged = handled.flagged.len(),
        removed = handled.removed.len(),
        defaulted = handled.defaulted.len(),
        rejected = handled.rejected.len(),
        "applied invalid-data handling"
    );
    handled
}

/// The column's default as a cell. Numeric columns get a number when the
/// default parses as one.
fn default_cell(column: &ColumnSchema) -> CellValue {
    let Some(default) = column.default_value.as_deref() else {
        return CellValue::Empty;
    };
    let text = CellValue::text(default);
    match column.type_tag {
        TypeTag::Number => text.as_number().map_or(text, CellValue::Number),
        _ => text,
    }
}
