//! # Intelli Extract Core
//!
//! Platform-neutral half of Intelli Extract: the form's session state, the
//! adapter that normalizes extraction-service responses, and score tiers.
//! Compiles for both the native client and the `wasm32` browser form.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   Submission   ┌─────────────┐   JSON body   ┌─────────────┐
//! │   Session   │───────────────▶│  Transport  │──────────────▶│   Adapter   │
//! │ (state)     │◀───────────────│ (reqwest /  │               │ (normalize) │
//! └─────────────┘   ResultSet    │  gloo-net)  │◀──────────────└─────────────┘
//!                                └─────────────┘   ResultSet
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and the user-facing failure message
//! - [`models`] - Categories, staged files, rows, scores
//! - [`schema`] - Configurable backend contracts (method and score names)
//! - [`adapter`] - Response normalization
//! - [`tier`] - Score normalization and high/medium/low tiers
//! - [`session`] - The session controller
//! - [`config`] - Shared constants and endpoint resolution

// Core modules
pub mod error;
pub mod models;
pub mod config;

// Response handling
pub mod schema;
pub mod adapter;
pub mod tier;

// State
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ExtractError, ExtractResult, ProfileError, USER_FAILURE_MESSAGE};

pub use models::{find_category, Category, ExtractionRow, ResultSet, Score, StagedFile, CATEGORIES};

pub use schema::{SchemaProfile, RAW_TEXT_KEY};

pub use adapter::{check_status, find_value, format_value, normalize, parse_response};

pub use tier::{ScoreScale, ScoreTier, HIGH_THRESHOLD, MEDIUM_THRESHOLD};

pub use session::{Session, Submission, SubmissionTicket};
