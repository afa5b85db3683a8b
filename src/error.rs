//! Error types for the review-lens library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the analysis pipeline.

use thiserror::Error;

/// Errors that can occur in the review-lens library.
#[derive(Error, Debug)]
pub enum ReviewLensError {
    /// Source file missing, unreadable, or not valid delimited text
    #[error("Load error: {0}")]
    Load(String),

    /// A column the pipeline requires is not present in the table
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// No table has been loaded into the session yet
    #[error("No review data loaded; call load first")]
    NoTableLoaded,

    /// The loaded source file was empty, so size reduction is undefined
    #[error("Size reduction undefined: original file size is zero")]
    ZeroOriginalSize,

    /// Destination unwritable or serialization failed
    #[error("Write error: {0}")]
    Write(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with ReviewLensError
pub type Result<T> = std::result::Result<T, ReviewLensError>;

impl From<anyhow::Error> for ReviewLensError {
    fn from(err: anyhow::Error) -> Self {
        ReviewLensError::Other(err.to_string())
    }
}
