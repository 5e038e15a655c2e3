//! Tracked preference dimensions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A named axis of viewer preference, tracked independently over time.
///
/// Variant order is the order dimensions appear in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceDimension {
    /// Content genre
    Genre,
    /// Narrative style
    Narrative,
    /// Editing pace
    Pace,
    /// Visual style
    Visuals,
    /// Audio style
    Audio,
    /// Plot complexity
    Complexity,
    /// Emotional tone
    Emotional,
    /// Recurring themes
    Themes,
}

impl PreferenceDimension {
    /// Every tracked dimension, in report order.
    pub const ALL: [PreferenceDimension; 8] = [
        Self::Genre,
        Self::Narrative,
        Self::Pace,
        Self::Visuals,
        Self::Audio,
        Self::Complexity,
        Self::Emotional,
        Self::Themes,
    ];

    /// Stable snake_case key used in stored snapshots and logs.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Narrative => "narrative",
            Self::Pace => "pace",
            Self::Visuals => "visuals",
            Self::Audio => "audio",
            Self::Complexity => "complexity",
            Self::Emotional => "emotional",
            Self::Themes => "themes",
        }
    }
}

impl std::fmt::Display for PreferenceDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PreferenceDimension {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.key() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("dimension", format!("unknown dimension '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_eight_distinct_dimensions() {
        let mut keys: Vec<_> = PreferenceDimension::ALL.iter().map(|d| d.key()).collect();
        keys.dedup();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn key_matches_serde_name() {
        for dimension in PreferenceDimension::ALL {
            let json = serde_json::to_string(&dimension).unwrap();
            assert_eq!(json, format!("\"{}\"", dimension.key()));
        }
    }

    #[test]
    fn parses_from_key() {
        assert_eq!(
            "complexity".parse::<PreferenceDimension>().unwrap(),
            PreferenceDimension::Complexity
        );
        assert!("colour".parse::<PreferenceDimension>().is_err());
    }

    #[test]
    fn ordering_follows_declaration() {
        assert!(PreferenceDimension::Genre < PreferenceDimension::Themes);
        assert!(PreferenceDimension::Pace < PreferenceDimension::Visuals);
    }
}
