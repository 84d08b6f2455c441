//! Score tiers for the result table badges.
//!
//! A score is first normalized to a 0-1 fraction according to its
//! [`ScoreScale`], then bucketed: `high` at or above [`HIGH_THRESHOLD`],
//! `medium` at or above [`MEDIUM_THRESHOLD`], `low` otherwise. Scores that
//! cannot be read as a number are `low`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Score;

/// Lower bound of the high tier.
pub const HIGH_THRESHOLD: f64 = 0.95;

/// Lower bound of the medium tier.
pub const MEDIUM_THRESHOLD: f64 = 0.85;

/// How numeric scores map onto the 0-1 range.
///
/// Percentage strings (`"96%"`) are divided by 100 under every scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreScale {
    /// Numbers above 1 are read as percentages.
    #[default]
    Auto,
    /// Numbers are already fractions.
    Unit,
    /// Numbers are always percentages.
    Percent,
}

impl ScoreScale {
    fn scale(self, n: f64) -> f64 {
        match self {
            ScoreScale::Auto if n > 1.0 => n / 100.0,
            ScoreScale::Auto | ScoreScale::Unit => n,
            ScoreScale::Percent => n / 100.0,
        }
    }
}

impl FromStr for ScoreScale {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ScoreScale::Auto),
            "unit" => Ok(ScoreScale::Unit),
            "percent" => Ok(ScoreScale::Percent),
            other => Err(format!("unknown score scale '{}' (expected auto, unit or percent)", other)),
        }
    }
}

/// Visual severity of a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    /// Bucket an already-normalized fraction.
    pub fn from_fraction(value: f64) -> Self {
        if value >= HIGH_THRESHOLD {
            ScoreTier::High
        } else if value >= MEDIUM_THRESHOLD {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::High => "high",
            ScoreTier::Medium => "medium",
            ScoreTier::Low => "low",
        }
    }

    /// CSS class for the score badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreTier::High => "score-badge score-high",
            ScoreTier::Medium => "score-badge score-medium",
            ScoreTier::Low => "score-badge score-low",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Score {
    /// The score as a 0-1 fraction, if it reads as a number at all.
    pub fn normalized(&self, scale: ScoreScale) -> Option<f64> {
        match self {
            Score::Number(n) => Some(scale.scale(*n)),
            Score::Text(text) => {
                let text = text.trim();
                if text.contains('%') {
                    parse_number(text).map(|n| n / 100.0)
                } else {
                    parse_number(text).map(|n| scale.scale(n))
                }
            }
            Score::Missing => None,
        }
        .filter(|n| n.is_finite())
    }

    /// Tier under the given scale.
    pub fn tier(&self, scale: ScoreScale) -> ScoreTier {
        self.normalized(scale)
            .map(ScoreTier::from_fraction)
            .unwrap_or(ScoreTier::Low)
    }
}

/// Parse the whole text as a number (`"9.7e-1"`, `"96 %"`), falling back
/// to its numeric prefix.
fn parse_number(text: &str) -> Option<f64> {
    text.trim_end_matches('%')
        .trim_end()
        .parse()
        .ok()
        .or_else(|| parse_leading_number(text))
}

/// Parse the longest numeric prefix (`"96.5% agreement"` -> 96.5).
fn parse_leading_number(text: &str) -> Option<f64> {
    let end = text
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_thresholds() {
        assert_eq!(Score::Number(0.97).tier(ScoreScale::Auto), ScoreTier::High);
        assert_eq!(Score::Number(0.90).tier(ScoreScale::Auto), ScoreTier::Medium);
        assert_eq!(Score::Number(0.40).tier(ScoreScale::Auto), ScoreTier::Low);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(ScoreTier::from_fraction(0.95), ScoreTier::High);
        assert_eq!(ScoreTier::from_fraction(0.85), ScoreTier::Medium);
        assert_eq!(ScoreTier::from_fraction(0.849), ScoreTier::Low);
    }

    #[test]
    fn test_percentage_string_is_divided() {
        let score = Score::Text("96%".into());
        assert_eq!(score.normalized(ScoreScale::Auto), Some(0.96));
        assert_eq!(score.tier(ScoreScale::Auto), ScoreTier::High);
        assert_eq!(score.tier(ScoreScale::Unit), ScoreTier::High);
        assert_eq!(Score::Text("88 %".into()).tier(ScoreScale::Auto), ScoreTier::Medium);
    }

    #[test]
    fn test_numeric_string_follows_scale() {
        assert_eq!(Score::Text("0.97".into()).tier(ScoreScale::Auto), ScoreTier::High);
        assert_eq!(Score::Text("90".into()).tier(ScoreScale::Auto), ScoreTier::Medium);
    }

    #[test]
    fn test_exponent_strings() {
        assert_eq!(Score::Text("1e-2".into()).normalized(ScoreScale::Auto), Some(0.01));
        assert_eq!(Score::Text("1e-2".into()).tier(ScoreScale::Auto), ScoreTier::Low);
        assert_eq!(Score::Text("9.7e-1".into()).tier(ScoreScale::Auto), ScoreTier::High);
        assert_eq!(Score::Text("9.7E-1".into()).tier(ScoreScale::Auto), ScoreTier::High);
        assert_eq!(Score::Text("9.6e1%".into()).tier(ScoreScale::Auto), ScoreTier::High);
    }

    #[test]
    fn test_prefix_fallback_for_annotated_text() {
        assert_eq!(Score::Text("96.5% agreement".into()).normalized(ScoreScale::Auto), Some(0.965));
        assert_eq!(Score::Text("0.9 (avg)".into()).tier(ScoreScale::Auto), ScoreTier::Medium);
    }

    #[test]
    fn test_implied_percentage_numbers() {
        assert_eq!(Score::Number(97.0).tier(ScoreScale::Auto), ScoreTier::High);
        assert_eq!(Score::Number(90.0).tier(ScoreScale::Percent), ScoreTier::Medium);
        assert_eq!(Score::Number(90.0).tier(ScoreScale::Unit), ScoreTier::High);
        // exactly 1.0 is a full-agreement fraction, not 1%
        assert_eq!(Score::Number(1.0).tier(ScoreScale::Auto), ScoreTier::High);
        // overshooting fractions need the unit scale
        assert_eq!(Score::Number(1.2).tier(ScoreScale::Auto), ScoreTier::Low);
        assert_eq!(Score::Number(1.2).tier(ScoreScale::Unit), ScoreTier::High);
    }

    #[test]
    fn test_unreadable_scores_are_low() {
        assert_eq!(Score::Missing.tier(ScoreScale::Auto), ScoreTier::Low);
        assert_eq!(Score::Text("n/a".into()).tier(ScoreScale::Auto), ScoreTier::Low);
        assert_eq!(Score::Text("".into()).tier(ScoreScale::Auto), ScoreTier::Low);
    }

    #[test]
    fn test_scale_names() {
        let scale: ScoreScale = serde_json::from_str("\"percent\"").unwrap();
        assert_eq!(scale, ScoreScale::Percent);
        assert_eq!("Unit".parse::<ScoreScale>(), Ok(ScoreScale::Unit));
        assert!("ratio".parse::<ScoreScale>().is_err());
    }
}
