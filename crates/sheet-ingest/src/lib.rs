//! Import ingestion.
//!
//! Turns files on disk into the inputs of the validation engine:
//!
//! - **CSV Loading**: header names and typed rows from a UTF-8 CSV file
//! - **Configuration**: the column schema, type defaults and drift policy
//!   from a JSON file, checked for schema problems on load
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sheet_ingest::{load_config, read_csv_table};
//!
//! let loaded = load_config(Path::new("import.json"))?;
//! let table = read_csv_table(Path::new("contacts.csv"))?;
//! ```

mod config;
mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    MAX_CSV_FILE_SIZE, Table, check_file_size, check_file_size_with_limit, normalize_header,
    read_csv_bytes, read_csv_table, validate_encoding,
};

// === Configuration ===
pub use config::{ImportConfig, LoadedConfig, load_config, parse_config};
