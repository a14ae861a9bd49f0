//! Command-line front end for checking spreadsheet imports.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod types;
