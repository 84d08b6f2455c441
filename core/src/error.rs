//! Error types for the extraction round trip.
//!
//! - [`ExtractError`] - anything that can go wrong between staging a file and
//!   holding a normalized [`crate::ResultSet`]
//! - [`ProfileError`] - an invalid [`crate::SchemaProfile`]
//!
//! Every [`ExtractError`] collapses to the same user-facing message
//! ([`USER_FAILURE_MESSAGE`]); the variants exist for logs and tests.

use thiserror::Error;

/// Message shown to the user for any failed submission.
pub const USER_FAILURE_MESSAGE: &str = "Failed to process document. Please try again.";

// =============================================================================
// Extraction Errors
// =============================================================================

/// Errors from one submission to the extraction service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// No endpoint could be resolved from any configuration source.
    #[error("Extraction service URL is not configured")]
    MissingEndpoint,

    /// Request could not be built or sent, or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status.
    #[error("API error: {status_text} ({status})")]
    Status { status: u16, status_text: String },

    /// Body is not valid JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Body is JSON but not shaped like a response envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ExtractError {
    /// The message to surface in the UI. Always the generic one.
    pub fn user_message(&self) -> &'static str {
        USER_FAILURE_MESSAGE
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::Decode(err.to_string())
    }
}

// =============================================================================
// Profile Errors
// =============================================================================

/// Errors building or loading a schema profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// Preset name not recognized.
    #[error("Unknown schema profile '{0}' (expected auto, m-series or legacy)")]
    UnknownPreset(String),

    /// A method slot has no key aliases.
    #[error("Method slot {0} has no key aliases")]
    EmptyMethodSlot(usize),

    /// Raw-text method index outside the three slots.
    #[error("Raw-text method index {0} is out of range (0-2)")]
    RawTextMethodOutOfRange(usize),

    /// No score field aliases.
    #[error("At least one score field is required")]
    NoScoreFields,

    /// Profile JSON could not be parsed.
    #[error("Invalid profile JSON: {0}")]
    Json(String),
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
