//! Preference snapshots and the per-dimension payload view

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::category::CategoryPreference;
use super::dimension::PreferenceDimension;
use super::levels::{ComplexityLevel, ComplexityPreference, PaceLevel, PacePreference};
use crate::domain::evolution::ShiftReport;
use crate::domain::foundation::{SnapshotId, Timestamp, UnitScore};

/// Multi-dimensional preference state of one viewer.
///
/// Each dimension is optional; a payload that does not match its expected
/// shape is read as absent instead of failing the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSet {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub genre: Option<CategoryPreference>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub narrative: Option<CategoryPreference>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pace: Option<PacePreference>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub visuals: Option<CategoryPreference>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub audio: Option<CategoryPreference>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub complexity: Option<ComplexityPreference>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub emotional: Option<CategoryPreference>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub themes: Option<CategoryPreference>,
}

/// Typed view of one dimension's payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionPreference<'a> {
    Categorical(Option<&'a CategoryPreference>),
    Pace(PaceLevel),
    Complexity(ComplexityLevel),
}

impl DimensionPreference<'_> {
    /// Scalar position of this preference on the 0-1 scale.
    pub fn metric(&self) -> UnitScore {
        match self {
            Self::Categorical(Some(category)) => category.top_strength(),
            Self::Categorical(None) => UnitScore::NEUTRAL,
            Self::Pace(level) => level.to_score(),
            Self::Complexity(level) => level.to_score(),
        }
    }
}

impl PreferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the payload for `dimension`, with defaults filled in.
    pub fn dimension(&self, dimension: PreferenceDimension) -> DimensionPreference<'_> {
        match dimension {
            PreferenceDimension::Genre => DimensionPreference::Categorical(self.genre.as_ref()),
            PreferenceDimension::Narrative => {
                DimensionPreference::Categorical(self.narrative.as_ref())
            }
            PreferenceDimension::Visuals => DimensionPreference::Categorical(self.visuals.as_ref()),
            PreferenceDimension::Audio => DimensionPreference::Categorical(self.audio.as_ref()),
            PreferenceDimension::Emotional => {
                DimensionPreference::Categorical(self.emotional.as_ref())
            }
            PreferenceDimension::Themes => DimensionPreference::Categorical(self.themes.as_ref()),
            PreferenceDimension::Pace => DimensionPreference::Pace(
                self.pace.map(|p| p.preferred_pace).unwrap_or_default(),
            ),
            PreferenceDimension::Complexity => DimensionPreference::Complexity(
                self.complexity
                    .map(|c| c.preferred_complexity)
                    .unwrap_or_default(),
            ),
        }
    }

    /// Scalar metric for `dimension`.
    pub fn metric(&self, dimension: PreferenceDimension) -> UnitScore {
        self.dimension(dimension).metric()
    }

    /// Sets the categorical payload for a categorical dimension.
    ///
    /// Ignored for pace and complexity, which carry levels instead.
    pub fn with_category(mut self, dimension: PreferenceDimension, pref: CategoryPreference) -> Self {
        let slot = match dimension {
            PreferenceDimension::Genre => &mut self.genre,
            PreferenceDimension::Narrative => &mut self.narrative,
            PreferenceDimension::Visuals => &mut self.visuals,
            PreferenceDimension::Audio => &mut self.audio,
            PreferenceDimension::Emotional => &mut self.emotional,
            PreferenceDimension::Themes => &mut self.themes,
            PreferenceDimension::Pace | PreferenceDimension::Complexity => return self,
        };
        *slot = Some(pref);
        self
    }

    pub fn with_pace(mut self, level: PaceLevel) -> Self {
        self.pace = Some(PacePreference::new(level));
        self
    }

    pub fn with_complexity(mut self, level: ComplexityLevel) -> Self {
        self.complexity = Some(ComplexityPreference::new(level));
        self
    }
}

/// One timestamped capture of a viewer's preference state.
///
/// The timestamp is kept as written so that history produced by other tools
/// can be loaded; it is parsed when the series is extracted. Analyzer output
/// stamps records with `analyzed_at`; `timestamp` wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<SnapshotId>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub preferences: PreferenceSet,
    /// Shift analysis computed when this snapshot was tracked.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub shifts: Option<ShiftReport>,
}

impl PreferenceSnapshot {
    /// Creates a snapshot with a fresh id at `captured_at`.
    pub fn new(captured_at: Timestamp, preferences: PreferenceSet) -> Self {
        Self {
            id: Some(SnapshotId::new()),
            timestamp: Some(captured_at.to_rfc3339()),
            analyzed_at: None,
            preferences,
            shifts: None,
        }
    }

    /// Creates a snapshot from a raw timestamp string, valid or not.
    pub fn with_raw_timestamp(raw: impl Into<String>, preferences: PreferenceSet) -> Self {
        Self {
            id: None,
            timestamp: Some(raw.into()),
            analyzed_at: None,
            preferences,
            shifts: None,
        }
    }

    pub fn with_shifts(mut self, shifts: ShiftReport) -> Self {
        self.shifts = Some(shifts);
        self
    }

    /// Parsed capture time, or `None` when missing or unparseable.
    ///
    /// `analyzed_at` is only consulted when `timestamp` is absent.
    pub fn captured_at(&self) -> Option<Timestamp> {
        self.timestamp
            .as_deref()
            .or(self.analyzed_at.as_deref())
            .and_then(|raw| Timestamp::parse_flexible(raw).ok())
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed preference payload");
            None
        }
    }))
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}
