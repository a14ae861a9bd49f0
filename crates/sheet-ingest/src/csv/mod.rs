//! CSV reading utilities.

mod header;
mod reader;

pub use header::normalize_header;
pub use reader::{
    MAX_CSV_FILE_SIZE, Table, check_file_size, check_file_size_with_limit, read_csv_bytes,
    read_csv_table, validate_encoding,
};
