use std::path::PathBuf;

use thiserror::Error;

use crate::regatta::tools::schema::Field;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests, reconciles, or emits report data.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a sheet does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the column index list and field list differ in length.
    #[error("cannot project {indices} column indices onto {fields} field names")]
    ColumnCountMismatch { indices: usize, fields: usize },

    /// Raised when a projection refers to a column the source does not have.
    #[error("column index {index} is out of range for a table with {width} columns")]
    ColumnOutOfRange { index: usize, width: usize },

    /// Raised when an operation needs a column the table does not carry.
    #[error("table has no '{0}' column")]
    MissingColumn(Field),

    /// Raised when a report layout does not describe a usable projection.
    #[error("invalid report layout: {0}")]
    InvalidLayout(String),

    /// Raised when a column name does not match any canonical field.
    #[error("unknown column name '{0}'")]
    UnknownField(String),

    /// Raised when an input report is not an xlsx workbook.
    #[error("unsupported report file type: {0}")]
    UnsupportedFileType(PathBuf),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
