//! Data model for spreadsheet import validation.
//!
//! Everything the validation engine consumes or produces lives here:
//!
//! - **Values** (`value`, `row`): typed cells and ordered rows as decoded from a file
//! - **Configuration** (`schema`, `rule`, `type_config`): declared columns, their
//!   validation rules and per-type defaults for an import session
//! - **Results** (`diagnostic`, `report`): row/column addressed diagnostics and the
//!   outcome of each validation gate

pub mod diagnostic;
pub mod error;
pub mod report;
pub mod row;
pub mod rule;
pub mod schema;
pub mod type_config;
pub mod value;

pub use diagnostic::{CellIssue, Category, Diagnostic, HEADER_ROW_OFFSET, display_row};
pub use error::{ModelError, Result};
pub use report::{DriftReport, HeaderReconciliation, SchemaDriftResult, ValidationResult};
pub use row::Row;
pub use rule::{CustomValidator, Rule, RuleKind, RuleType};
pub use schema::{ColumnHandling, ColumnSchema, InvalidDataHandling, TypeTag};
pub use type_config::{
    BooleanConfig, DEFAULT_EMAIL_PATTERN, DEFAULT_PHONE_PATTERN, DateConfig, EmailConfig,
    NumberConfig, PhoneConfig, TextConfig, TypeConfig,
};
pub use value::{CellValue, format_number};
