//! Domain models shared by the native client and the browser form.
//!
//! - [`Category`] / [`CATEGORIES`] - the fixed document-type enumeration
//! - [`StagedFile`] - a file chosen for upload (native payload)
//! - [`Score`] - a confidence score exactly as the backend sent it
//! - [`ExtractionRow`] / [`ResultSet`] - the normalized, renderable result

use serde::Serialize;
use std::fmt;

// =============================================================================
// Categories
// =============================================================================

/// A selectable document category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier sent to the service as `doc_type`
    pub id: &'static str,
    /// Label shown in the category list
    pub display_name: &'static str,
    /// Icon key used by the views
    pub icon_tag: &'static str,
}

/// Every category the form offers, in display order.
pub const CATEGORIES: &[Category] = &[
    Category { id: "passport", display_name: "Passport", icon_tag: "passport" },
    Category { id: "voterid", display_name: "Voter ID", icon_tag: "voterid" },
    Category { id: "domicile", display_name: "Domicile", icon_tag: "domicile" },
    Category { id: "license", display_name: "Driving License", icon_tag: "license" },
    Category { id: "marksheet", display_name: "Marksheet", icon_tag: "marksheet" },
    Category { id: "aadhaar", display_name: "Aadhaar Card", icon_tag: "aadhaar" },
];

/// Look up a category by id.
pub fn find_category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

// =============================================================================
// Staged File
// =============================================================================

/// An uploaded image held in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedFile {
    /// Original file name, forwarded in the multipart part
    pub filename: String,
    /// MIME type of the content
    pub mime_type: String,
    /// Raw file bytes
    pub content: Vec<u8>,
}

impl StagedFile {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// =============================================================================
// Score
// =============================================================================

/// Consensus score for one attribute, kept in the backend's own format.
///
/// Backends have sent plain fractions (`0.97`), implied percentages (`97`)
/// and percentage strings (`"97%"`). Tiering normalizes; display does not.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
    Missing,
}

impl Score {
    /// Build a score from an arbitrary JSON value.
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        use serde_json::Value;

        match value {
            None | Some(Value::Null) => Score::Missing,
            Some(Value::Number(n)) => n.as_f64().map(Score::Number).unwrap_or(Score::Missing),
            Some(Value::String(s)) => Score::Text(s.clone()),
            Some(other) => Score::Text(other.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Score::Missing)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Number(n) => f.write_str(&format_number(*n)),
            Score::Text(s) => f.write_str(s),
            Score::Missing => f.write_str("-"),
        }
    }
}

/// Shortest display form of a number: integral values drop the fraction.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// One attribute compared across the three extraction methods.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExtractionRow {
    /// Attribute name as it appears in the confidence matrix
    pub attribute: String,
    /// Formatted values, one per method slot
    pub values: [String; 3],
    /// Consensus score, unmodified
    pub score: Score,
}

impl ExtractionRow {
    pub fn value(&self, method: usize) -> &str {
        self.values.get(method).map(String::as_str).unwrap_or("-")
    }
}

/// Normalized output of one successful submission.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResultSet {
    /// Rows in confidence-matrix key order
    pub rows: Vec<ExtractionRow>,
    /// Full OCR text from the distinguished method, empty when absent
    pub raw_text: String,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.raw_text.is_empty()
    }
}
