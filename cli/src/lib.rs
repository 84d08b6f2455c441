//! # Intelli Extract CLI
//!
//! Native client for the document extraction service: stages an image,
//! submits it for a document category, and renders the field-by-field
//! comparison across the three extraction methods.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Image File │────▶│   Session   │────▶│   Client    │────▶│   Render    │
//! │  + category │     │ (core)      │◀────│  (reqwest)  │     │ table/json/ │
//! └─────────────┘     └─────────────┘     └─────────────┘     │ csv         │
//!                                                             └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intelli_extract::{run_extraction, ExtractionClient, load_staged_file};
//! use intelli_extract_core::SchemaProfile;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ExtractionClient::new("http://localhost:8080/api/v1/compare", SchemaProfile::auto());
//!     let file = load_staged_file("passport.jpg".as_ref()).unwrap();
//!     let session = run_extraction(&client, "passport", file).await;
//!     println!("{} rows", session.rows().len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - CLI and mock-server error types
//! - [`client`] - Multipart HTTP client
//! - [`render`] - Table, JSON and CSV output
//! - [`logger`] - Console logger for the `log` facade
//! - [`mock`] - Mock extraction service

pub mod error;
pub mod client;
pub mod render;
pub mod logger;
pub mod mock;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CliError, CliResult, ServerError, ServerResult};
pub use client::{load_staged_file, mime_for_path, ExtractionClient};
pub use render::{render, OutputFormat};
pub use mock::{canned_envelope, MockFlavor, MockResponse, MockService, ReceivedUpload, COMPARE_PATH};

use intelli_extract_core::{config, Session, StagedFile};

/// Resolve the endpoint for the CLI: flag, then `API_BASE_URL` from the
/// environment (after `.env` loading), then the build-time value.
pub fn resolve_cli_endpoint(flag: Option<&str>) -> String {
    let from_env = std::env::var(config::API_URL_KEY).ok();
    config::resolve_endpoint([flag, from_env.as_deref(), config::BUILD_API_BASE_URL])
}

/// Run one session: select the category, stage the file, submit, and record
/// the outcome. The returned session holds either results or the error.
pub async fn run_extraction(client: &ExtractionClient, category_id: &str, file: StagedFile) -> Session {
    let mut session = Session::new();
    session.select_category(category_id);

    let Some(submission) = session.stage_file(Some(file)) else {
        return session;
    };

    match client.submit(&submission.file, &submission.category_id).await {
        Ok(result_set) => {
            session.submission_succeeded(submission.ticket, result_set);
        }
        Err(e) => {
            session.submission_failed(submission.ticket, &e);
        }
    }

    session
}
