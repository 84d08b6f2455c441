//! Backend response contracts.
//!
//! The extraction service has shipped several envelope revisions that differ
//! in the names of the three method objects and of the score field:
//!
//! | Preset      | Method keys                                           | Score field        |
//! |-------------|-------------------------------------------------------|--------------------|
//! | `m-series`  | `M1`, `M2`, `M3`                                      | `consensus_score`  |
//! | `legacy`    | `legacy_ocr_regex`, `llama_maverick_17b`, `llama_11b` | `Cumulative_Score` |
//! | `auto`      | union of both, per slot                               | union of both      |
//!
//! A [`SchemaProfile`] names the aliases for each slot rather than hard-coding
//! one revision. Custom profiles load from JSON; omitted fields take the
//! `auto` values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ProfileError;
use crate::tier::ScoreScale;

/// Pseudo-attribute that carries OCR text rather than a field.
pub const RAW_TEXT_KEY: &str = "raw_text";

/// Field names used to read one backend revision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaProfile {
    /// Key aliases for each method slot inside `extractions`
    pub method_keys: [Vec<String>; 3],
    /// Column headings for the three slots
    pub method_labels: [String; 3],
    /// Score field aliases inside each confidence-matrix entry
    pub score_fields: Vec<String>,
    /// Slot whose output carries the raw text
    pub raw_text_method: usize,
    /// Key of the raw text inside that slot
    pub raw_text_field: String,
    /// Matrix keys that never become rows
    pub reserved_keys: Vec<String>,
    /// How numeric scores map onto 0-1
    pub score_scale: ScoreScale,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SchemaProfile {
    /// `M1`/`M2`/`M3` methods with `consensus_score`.
    pub fn m_series() -> Self {
        Self {
            method_keys: [strings(&["M1"]), strings(&["M2"]), strings(&["M3"])],
            score_fields: strings(&["consensus_score"]),
            ..Self::base()
        }
    }

    /// Named model methods with `Cumulative_Score`.
    pub fn legacy() -> Self {
        Self {
            method_keys: [
                strings(&["legacy_ocr_regex"]),
                strings(&["llama_maverick_17b"]),
                strings(&["llama_11b"]),
            ],
            score_fields: strings(&["Cumulative_Score"]),
            ..Self::base()
        }
    }

    /// Accepts every known revision.
    pub fn auto() -> Self {
        Self {
            method_keys: [
                strings(&["M1", "legacy_ocr_regex"]),
                strings(&["M2", "llama_maverick_17b"]),
                strings(&["M3", "llama_11b"]),
            ],
            score_fields: strings(&["consensus_score", "Cumulative_Score"]),
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            method_keys: [Vec::new(), Vec::new(), Vec::new()],
            method_labels: ["M1".to_string(), "M2".to_string(), "M3".to_string()],
            score_fields: Vec::new(),
            raw_text_method: 0,
            raw_text_field: RAW_TEXT_KEY.to_string(),
            reserved_keys: strings(&[RAW_TEXT_KEY]),
            score_scale: ScoreScale::Auto,
        }
    }

    /// Set the score scale.
    pub fn with_score_scale(mut self, scale: ScoreScale) -> Self {
        self.score_scale = scale;
        self
    }

    /// Load and validate a profile from JSON.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: Self =
            serde_json::from_str(json).map_err(|e| ProfileError::Json(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check the profile can address all three slots and a score.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if let Some(slot) = self.method_keys.iter().position(|keys| keys.is_empty()) {
            return Err(ProfileError::EmptyMethodSlot(slot));
        }
        if self.raw_text_method >= self.method_keys.len() {
            return Err(ProfileError::RawTextMethodOutOfRange(self.raw_text_method));
        }
        if self.score_fields.is_empty() {
            return Err(ProfileError::NoScoreFields);
        }
        Ok(())
    }

    /// Whether a matrix key is reserved (case-insensitive).
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_keys.iter().any(|r| r.eq_ignore_ascii_case(key))
    }
}

impl Default for SchemaProfile {
    fn default() -> Self {
        Self::auto()
    }
}

impl FromStr for SchemaProfile {
    type Err = ProfileError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::auto()),
            "m-series" | "m_series" | "m" => Ok(Self::m_series()),
            "legacy" => Ok(Self::legacy()),
            other => Err(ProfileError::UnknownPreset(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for profile in [SchemaProfile::auto(), SchemaProfile::m_series(), SchemaProfile::legacy()] {
            assert!(profile.validate().is_ok());
        }
    }

    #[test]
    fn test_preset_names() {
        assert_eq!("legacy".parse::<SchemaProfile>().unwrap(), SchemaProfile::legacy());
        assert_eq!("M-Series".parse::<SchemaProfile>().unwrap(), SchemaProfile::m_series());
        assert!(matches!(
            "v4".parse::<SchemaProfile>(),
            Err(ProfileError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_partial_json_takes_auto_defaults() {
        let profile = SchemaProfile::from_json(r#"{"score_fields": ["agreement"]}"#).unwrap();
        assert_eq!(profile.score_fields, vec!["agreement".to_string()]);
        assert_eq!(profile.method_keys, SchemaProfile::auto().method_keys);
        assert_eq!(profile.raw_text_field, "raw_text");
    }

    #[test]
    fn test_invalid_profiles_rejected() {
        let err = SchemaProfile::from_json(r#"{"method_keys": [["A"], [], ["C"]]}"#).unwrap_err();
        assert_eq!(err, ProfileError::EmptyMethodSlot(1));

        let err = SchemaProfile::from_json(r#"{"raw_text_method": 3}"#).unwrap_err();
        assert_eq!(err, ProfileError::RawTextMethodOutOfRange(3));

        let err = SchemaProfile::from_json(r#"{"score_fields": []}"#).unwrap_err();
        assert_eq!(err, ProfileError::NoScoreFields);

        assert!(matches!(SchemaProfile::from_json("["), Err(ProfileError::Json(_))));
    }

    #[test]
    fn test_reserved_keys_ignore_case() {
        let profile = SchemaProfile::auto();
        assert!(profile.is_reserved("raw_text"));
        assert!(profile.is_reserved("RAW_TEXT"));
        assert!(!profile.is_reserved("name"));
    }
}
