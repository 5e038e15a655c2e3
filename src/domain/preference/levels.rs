//! Enumerated preference levels for pace and complexity

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UnitScore;

/// Preferred editing pace.
///
/// Labels outside the known scale deserialize to `Unrecognized` and score
/// as moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceLevel {
    VerySlow,
    Slow,
    Moderate,
    Fast,
    VeryFast,
    #[serde(other)]
    Unrecognized,
}

impl PaceLevel {
    /// Position on the 0-1 pace scale.
    pub fn to_score(&self) -> UnitScore {
        match self {
            Self::VerySlow => UnitScore::ZERO,
            Self::Slow => UnitScore::new(0.25),
            Self::Moderate | Self::Unrecognized => UnitScore::NEUTRAL,
            Self::Fast => UnitScore::new(0.75),
            Self::VeryFast => UnitScore::ONE,
        }
    }
}

impl Default for PaceLevel {
    fn default() -> Self {
        Self::Moderate
    }
}

impl std::fmt::Display for PaceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VerySlow => write!(f, "Very Slow"),
            Self::Slow => write!(f, "Slow"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Fast => write!(f, "Fast"),
            Self::VeryFast => write!(f, "Very Fast"),
            Self::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

/// Preferred plot complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    VerySimple,
    Simple,
    Moderate,
    Complex,
    VeryComplex,
    #[serde(other)]
    Unrecognized,
}

impl ComplexityLevel {
    /// Position on the 0-1 complexity scale.
    pub fn to_score(&self) -> UnitScore {
        match self {
            Self::VerySimple => UnitScore::ZERO,
            Self::Simple => UnitScore::new(0.25),
            Self::Moderate | Self::Unrecognized => UnitScore::NEUTRAL,
            Self::Complex => UnitScore::new(0.75),
            Self::VeryComplex => UnitScore::ONE,
        }
    }
}

impl Default for ComplexityLevel {
    fn default() -> Self {
        Self::Moderate
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VerySimple => write!(f, "Very Simple"),
            Self::Simple => write!(f, "Simple"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Complex => write!(f, "Complex"),
            Self::VeryComplex => write!(f, "Very Complex"),
            Self::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

/// Pace payload of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacePreference {
    #[serde(default)]
    pub preferred_pace: PaceLevel,
}

impl PacePreference {
    pub fn new(preferred_pace: PaceLevel) -> Self {
        Self { preferred_pace }
    }
}

/// Complexity payload of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityPreference {
    #[serde(default)]
    pub preferred_complexity: ComplexityLevel,
}

impl ComplexityPreference {
    pub fn new(preferred_complexity: ComplexityLevel) -> Self {
        Self {
            preferred_complexity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pace_scale_matches_lookup_table() {
        assert_eq!(PaceLevel::VerySlow.to_score().value(), 0.0);
        assert_eq!(PaceLevel::Slow.to_score().value(), 0.25);
        assert_eq!(PaceLevel::Moderate.to_score().value(), 0.5);
        assert_eq!(PaceLevel::Fast.to_score().value(), 0.75);
        assert_eq!(PaceLevel::VeryFast.to_score().value(), 1.0);
    }

    #[test]
    fn complexity_scale_matches_lookup_table() {
        assert_eq!(ComplexityLevel::VerySimple.to_score().value(), 0.0);
        assert_eq!(ComplexityLevel::Simple.to_score().value(), 0.25);
        assert_eq!(ComplexityLevel::Moderate.to_score().value(), 0.5);
        assert_eq!(ComplexityLevel::Complex.to_score().value(), 0.75);
        assert_eq!(ComplexityLevel::VeryComplex.to_score().value(), 1.0);
    }

    #[test]
    fn unknown_labels_score_as_moderate() {
        let pace: PaceLevel = serde_json::from_str("\"ludicrous\"").unwrap();
        assert_eq!(pace, PaceLevel::Unrecognized);
        assert_eq!(pace.to_score(), UnitScore::NEUTRAL);

        let complexity: ComplexityLevel = serde_json::from_str("\"baroque\"").unwrap();
        assert_eq!(complexity.to_score(), UnitScore::NEUTRAL);
    }

    #[test]
    fn missing_label_defaults_to_moderate() {
        let pace: PacePreference = serde_json::from_str("{}").unwrap();
        assert_eq!(pace.preferred_pace, PaceLevel::Moderate);

        let complexity: ComplexityPreference =
            serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(complexity.preferred_complexity, ComplexityLevel::Moderate);
    }

    #[test]
    fn payload_reads_snake_case_label() {
        let pace: PacePreference =
            serde_json::from_str(r#"{"preferred_pace": "very_fast"}"#).unwrap();
        assert_eq!(pace.preferred_pace, PaceLevel::VeryFast);
    }

    #[test]
    fn display_labels() {
        assert_eq!(format!("{}", PaceLevel::VeryFast), "Very Fast");
        assert_eq!(format!("{}", ComplexityLevel::Simple), "Simple");
    }
}
