//! Error types for qslog
//!
//! Provides a unified error type for all fallible operations. Unparseable
//! answers are not errors: the prompter re-asks instead.

use thiserror::Error;

/// Result type alias using QsError
pub type Result<T> = std::result::Result<T, QsError>;

/// Unified error type for qslog operations
#[derive(Debug, Error)]
pub enum QsError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // -------------------------------------------------------------------------
    // Log Schema Errors
    // -------------------------------------------------------------------------
    #[error("Malformed log header in {path}: {reason}")]
    MalformedHeader { path: String, reason: String },

    #[error("Malformed log row {line} in {path}: expected {expected} fields, found {found}")]
    MalformedRow {
        path: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Schema error: {0}")]
    Schema(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Interactive Errors
    // -------------------------------------------------------------------------
    /// Input ended (EOF) while a question was pending
    #[error("Input closed before all questions were answered")]
    Cancelled,
}

impl QsError {
    /// Whether this error is an operator cancellation rather than a failure
    pub fn is_cancellation(&self) -> bool {
        matches!(self, QsError::Cancelled)
    }
}
