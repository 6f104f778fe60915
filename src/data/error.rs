use thiserror::Error;

/// Row-level schema violations found while decoding a launch table.
///
/// Row numbers are zero-based data rows (the header is not counted).
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' is null")]
    NullValue { row: usize, column: String },

    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: f64 },

    #[error("row {row}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: flight number must be a non-negative integer, got {value}")]
    InvalidFlightNumber { row: usize, value: f64 },

    #[error("column '{column}' has unsupported type {found}")]
    ColumnType { column: String, found: String },
}
