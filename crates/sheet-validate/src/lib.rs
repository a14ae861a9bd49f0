//! Validation engine for spreadsheet imports.
//!
//! An import passes three gates in order:
//!
//! - **Headers** ([`reconcile_headers`]): every required column must be present
//! - **Schema drift** ([`resolve_schema`]): undeclared columns are rejected,
//!   stripped or kept according to a [`ColumnHandling`](sheet_model::ColumnHandling) policy
//! - **Cells** ([`validate`]): every value is type checked and run through its
//!   column's rules, producing category-bucketed diagnostics
//!
//! [`run_import`] chains the three. The engine is a pure function of its
//! inputs: data problems become diagnostics, never errors, and nothing is
//! cached between calls.
//!
//! # Example
//!
//! ```ignore
//! use sheet_model::{ColumnHandling, ColumnSchema, Row, TypeConfig, TypeTag};
//! use sheet_validate::run_import;
//!
//! let schema = vec![ColumnSchema::new("email", TypeTag::Email).required()];
//! let rows = vec![Row::from_iter([("email", "ada@example.com")])];
//! let config = TypeConfig::default();
//! let report = run_import(&["email"], &rows, &schema, &config, ColumnHandling::Warn);
//! assert!(report.is_importable());
//! ```

mod checks;
pub mod coerce;
mod drift;
mod handling;
mod headers;
mod lint;
mod pattern;
mod pipeline;
mod rules;
mod validator;

pub use checks::check_type;
pub use drift::resolve_schema;
pub use handling::{CellRef, HandledRows, apply_invalid_handling};
pub use headers::reconcile_headers;
pub use lint::{SchemaIssue, lint_schema};
pub use pattern::compile_pattern;
pub use pipeline::{Gate, ImportReport, run_import};
pub use rules::evaluate_rule;
pub use validator::validate;
