//! Error types for the data layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a listings file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not reference an existing file.
    #[error("File '{}' not found in the directory.", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but its content could not be parsed.
    #[error("Error parsing file '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// No reader exists for the file extension.
    #[error("Unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },
}

/// Errors that prevent the filter engine from running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// One or more of the required columns is absent from the table.
    #[error("One or more required columns (City, Price, Square Footage) are missing from the data.")]
    MissingColumns(Vec<String>),
}

/// Errors that can occur when exporting listings.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{}': {source}", path.display())]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },

    /// Failed to flush the output file.
    #[error("failed to write data: {source}")]
    Flush {
        #[from]
        source: std::io::Error,
    },
}
