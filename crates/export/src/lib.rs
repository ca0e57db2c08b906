pub mod csv;
pub mod validate;

pub use crate::csv::{read_statement, statement_to_csv, write_statement, ExportError};
pub use validate::{compare_lines, validate_files, LineDiff, ValidateError, ValidationReport};
