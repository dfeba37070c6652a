//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading the interaction and metadata tables.
///
/// A load error at startup is fatal for the binaries: without both tables
/// the process cannot serve any request.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A row in a CSV file couldn't be deserialized
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
