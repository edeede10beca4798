//! Error types for ingestion operations.

use thiserror::Error;

/// Errors that can occur while building the delivery database.
///
/// Missing source files and label mismatches are deliberately absent here:
/// both are advisory conditions reported through [`crate::loader::LoadOutcome`]
/// and never abort a run.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Source file could not be parsed as CSV
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or input error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;
