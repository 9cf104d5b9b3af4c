//! Error types for data file loading.

use thiserror::Error;

/// Errors that can occur when loading tuning or mission data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// File parsed but the values break an invariant.
    #[error("Invalid data in '{path}': {details}")]
    Invalid { path: String, details: String },
}

impl DataLoadError {
    pub fn invalid(path: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.into(),
            details: details.into(),
        }
    }
}
