use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, DataError>;

/// Error type covering the failures that can occur while loading, merging,
/// summarising, or exporting the crime statistics tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors raised while building Arrow batches or reading/writing CSV.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Errors raised by the Parquet writer.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Raised when a workbook does not have the expected sheets.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a required data file is missing.
    #[error("file not found: {}{}", path.display(), hint.as_deref().map(|h| format!("\n{h}")).unwrap_or_default())]
    NotFound { path: PathBuf, hint: Option<String> },

    /// Raised when a merge is requested and neither source file exists.
    #[error("no data files available to merge")]
    NoDataAvailable,

    /// Raised when an export format is not one of csv, excel/xlsx, parquet.
    #[error("unsupported export format '{0}'")]
    UnsupportedFormat(String),

    /// Raised when an operation needs a column the table does not have.
    #[error("table must contain a '{0}' column")]
    MissingColumn(String),

    /// Raised when two columns would share a name.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// Raised when a column length does not match the table height.
    #[error("column '{column}' has {found} rows, expected {expected}")]
    RaggedTable {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl DataError {
    /// `true` for the errors a merge can recover from by falling back to the
    /// other source.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }
}
