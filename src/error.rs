//! Error types for tableplot operations.

use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building datasets, plots, or output.
///
/// Failures from the I/O layer and from Arrow (CSV parsing, batch
/// construction) are carried through unchanged in [`Error::Io`] and
/// [`Error::Arrow`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (missing CSV file, unwritable output, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Arrow error (CSV parsing, schema inference, batch construction).
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// A column name that is not present in the dataset.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A column whose length differs from the other columns of a dataset.
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        /// Offending column name.
        column: String,
        /// Row count of the first column.
        expected: usize,
        /// Row count of the offending column.
        actual: usize,
    },

    /// The same column name was given twice.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A channel that does not supply one value per mark.
    #[error("Channel '{channel}' has {actual} values, mark has {expected}")]
    ChannelLengthMismatch {
        /// Channel name.
        channel: &'static str,
        /// Length of the mark data.
        expected: usize,
        /// Length of the channel values.
        actual: usize,
    },

    /// A column type that cannot be read back as plot values.
    #[error("Unsupported column type for '{column}': {data_type}")]
    UnsupportedType {
        /// Column name.
        column: String,
        /// Arrow data type of the column.
        data_type: DataType,
    },

    /// Malformed tick format string.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Unknown color scheme name.
    #[error("Unknown color scheme: {0}")]
    UnknownScheme(String),

    /// A plot without marks.
    #[error("No marks specified")]
    NoMarks,

    /// Scale domain error (e.g., equal domain bounds).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Configuration file not found.
    #[error("Configuration not found: {0}")]
    ConfigNotFound(String),

    /// Configuration parse error.
    #[error("Configuration parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number of the error.
        line: usize,
        /// Parser message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ColumnNotFound("Anomaly".into());
        assert!(err.to_string().contains("Anomaly"));
    }

    #[test]
    fn test_column_length_mismatch() {
        let err = Error::ColumnLengthMismatch { column: "age".into(), expected: 3, actual: 2 };
        let msg = err.to_string();
        assert!(msg.contains("age"));
        assert!(msg.contains('3'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_io_error_passthrough() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gistemp.csv");
        let err: Error = io_err.into();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_type_display() {
        let err = Error::UnsupportedType { column: "blob".into(), data_type: DataType::Binary };
        assert!(err.to_string().contains("Binary"));
    }
}
