//! Extraction service communication.
//!
//! # Services
//!
//! - [`extraction`] - Multipart upload of a document image to the comparison endpoint

pub mod extraction;

pub use extraction::*;
