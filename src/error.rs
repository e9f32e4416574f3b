use thiserror::Error;

/// Convenience result type for fallible operations in this crate.
pub type PrepResult<T> = Result<T, PrepError>;

/// Error type returned by filtering, CSV ingestion and CSV export.
///
/// Preprocessing itself never fails; degenerate numeric cases are passed through as
/// [`crate::types::Value::Null`] instead.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A column required by the row filter is absent from the dataset.
    #[error("columns '{site_column}' and/or '{year_column}' are missing in the dataset")]
    MissingColumns {
        site_column: String,
        year_column: String,
    },

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the provided schema.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}
