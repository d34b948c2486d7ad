//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading the fallback catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The catalog file is not valid JSON, or has the wrong shape
    #[error("Failed to parse catalog file {path}: {reason}")]
    ParseError { path: String, reason: String },

    /// A muscle entry was present but listed no exercises
    #[error("Fallback catalog entry for '{muscle}' is empty")]
    EmptyEntry { muscle: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
