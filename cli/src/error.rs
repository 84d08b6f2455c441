//! Error types for the command-line client.
//!
//! - [`CliError`] - top-level errors, wrapping lower-level ones
//! - [`ServerError`] - mock extraction service errors
//!
//! Error conversion is automatic via `From` implementations, so `?` works
//! across crate boundaries (core adapter errors, I/O, CSV, JSON).

use intelli_extract_core::{ExtractError, ProfileError};
use thiserror::Error;

// =============================================================================
// Mock Server Errors
// =============================================================================

/// Errors from the mock extraction service.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture file is not valid JSON.
    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),

    /// Forced status is not a valid HTTP status code.
    #[error("Invalid status code: {0}")]
    InvalidStatus(u16),
}

// =============================================================================
// CLI Errors (top-level)
// =============================================================================

/// Top-level errors of the `intelli-extract` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Submission or normalization failed.
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Schema profile could not be loaded.
    #[error("Schema profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Category id is not in the enumeration.
    #[error("Unknown category '{0}' (run `intelli-extract categories` for the list)")]
    UnknownCategory(String),

    /// The session recorded a failed submission.
    #[error("{0}")]
    SubmissionFailed(String),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Mock server error.
    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Result type for mock server operations.
pub type ServerResult<T> = Result<T, ServerError>;
