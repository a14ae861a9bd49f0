//! Export of validated import data.
//!
//! - **Formatting** ([`format_cell`]): numbers with thousands separators, dates
//!   in the configured layout, booleans as `Yes`/`No`, phones in their display
//!   layout
//! - **CSV** ([`write_csv`]): cleaned rows in schema column order
//! - **Report** ([`write_report`]): the outcome of every import gate as JSON

mod error;
mod format;
mod writer;

pub use error::{OutputError, Result};
pub use format::{format_cell, format_phone, group_thousands};
pub use writer::{ensure_parent_dir, export_columns, write_csv, write_csv_to, write_report};
