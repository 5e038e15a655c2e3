//! Categorical preferences carrying a strength map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::UnitScore;

/// Strength of a single category label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrengthEntry {
    /// Share of engagement attributed to this label
    #[serde(default)]
    pub ratio: Option<f64>,
    /// Qualitative bucket (e.g. "strong")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
}

impl StrengthEntry {
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio: Some(ratio),
            ..Self::default()
        }
    }
}

/// Preference over category labels (genres, styles, emotions, themes).
///
/// `favorites` is ordered strongest first. Snapshots written by the
/// preference analyzer name this list per dimension (`preferred_styles`,
/// `preferred_emotions`, `preferred_themes`); all spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPreference {
    #[serde(
        default,
        alias = "preferred_styles",
        alias = "preferred_emotions",
        alias = "preferred_themes"
    )]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub strength_map: BTreeMap<String, StrengthEntry>,
}

impl CategoryPreference {
    pub fn new(favorites: Vec<String>, strength_map: BTreeMap<String, StrengthEntry>) -> Self {
        Self {
            favorites,
            strength_map,
        }
    }

    /// Leading favourite, if any.
    pub fn top_favorite(&self) -> Option<&str> {
        self.favorites.first().map(String::as_str)
    }

    /// Strength of the leading favourite.
    ///
    /// Neutral when there is no favourite or it has no strength entry; an
    /// entry without a ratio counts as zero.
    pub fn top_strength(&self) -> UnitScore {
        self.top_favorite()
            .and_then(|label| self.strength_map.get(label))
            .map(|entry| UnitScore::new(entry.ratio.unwrap_or(0.0)))
            .unwrap_or(UnitScore::NEUTRAL)
    }
}
