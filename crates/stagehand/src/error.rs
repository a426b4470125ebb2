//! Error types for Stagehand operations.
//!
//! This module provides the main error type [`StagehandError`] which wraps
//! the error conditions that can occur while reading, laying out and writing
//! diagrams.

use std::io;

use thiserror::Error;

/// The main error type for Stagehand operations.
///
/// # Diagnostic Variants
///
/// The `Json` variant keeps the document it failed on, so that error reporting
/// can point at the offending line and column.
#[derive(Debug, Error)]
pub enum StagehandError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Json { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StagehandError {
    /// Create a new `Json` error with the associated source document.
    pub fn new_json_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Json {
            err,
            src: src.into(),
        }
    }
}

impl From<serde_json::Error> for StagehandError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            err,
            src: String::new(),
        }
    }
}
