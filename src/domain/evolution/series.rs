//! Per-dimension time series extraction

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UnitScore};
use crate::domain::preference::{PreferenceDimension, PreferenceSnapshot};

/// One observation of a dimension's scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: Timestamp,
    pub value: UnitScore,
}

impl SeriesPoint {
    pub fn new(timestamp: Timestamp, value: UnitScore) -> Self {
        Self { timestamp, value }
    }
}

/// Chronologically ordered values of one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSeries {
    dimension: PreferenceDimension,
    points: Vec<SeriesPoint>,
}

impl DimensionSeries {
    /// Extracts `dimension` from every snapshot with a parseable timestamp.
    ///
    /// Snapshots whose timestamp is missing or unparseable are dropped.
    /// Points are sorted by time; snapshots sharing a timestamp keep their
    /// history order.
    pub fn extract(history: &[PreferenceSnapshot], dimension: PreferenceDimension) -> Self {
        let points: Vec<SeriesPoint> = history
            .iter()
            .filter_map(|snapshot| {
                let timestamp = snapshot.captured_at()?;
                Some(SeriesPoint::new(
                    timestamp,
                    snapshot.preferences.metric(dimension),
                ))
            })
            .collect();

        let dropped = history.len() - points.len();
        if dropped > 0 {
            tracing::debug!(
                dimension = %dimension,
                dropped,
                "Skipped snapshots without a usable timestamp"
            );
        }

        Self::from_points(dimension, points)
    }

    /// Builds a series from arbitrary points, sorting them by time.
    pub fn from_points(dimension: PreferenceDimension, mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { dimension, points }
    }

    pub fn dimension(&self) -> PreferenceDimension {
        self.dimension
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observed value.
    pub fn last_value(&self) -> Option<UnitScore> {
        self.points.last().map(|p| p.value)
    }

    /// Days between the first and last observation (0 for fewer than two).
    pub fn span_days(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.timestamp.days_since(&first.timestamp),
            _ => 0.0,
        }
    }

    /// `(days since first point, value)` pairs for regression.
    pub fn day_offsets(&self) -> Vec<(f64, f64)> {
        let Some(base) = self.points.first().map(|p| p.timestamp) else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|p| (p.timestamp.days_since(&base), p.value.value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preference::{PaceLevel, PreferenceSet};

    fn pace_snapshot(raw_ts: &str, level: PaceLevel) -> PreferenceSnapshot {
        PreferenceSnapshot::with_raw_timestamp(raw_ts, PreferenceSet::new().with_pace(level))
    }

    #[test]
    fn extract_sorts_chronologically() {
        let history = vec![
            pace_snapshot("2024-01-03T00:00:00Z", PaceLevel::Fast),
            pace_snapshot("2024-01-01T00:00:00Z", PaceLevel::Slow),
            pace_snapshot("2024-01-02T00:00:00", PaceLevel::Moderate),
        ];
        let series = DimensionSeries::extract(&history, PreferenceDimension::Pace);
        let values: Vec<f64> = series.points().iter().map(|p| p.value.value()).collect();
        assert_eq!(values, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn extract_drops_unparseable_timestamps() {
        let mut missing = pace_snapshot("x", PaceLevel::Fast);
        missing.timestamp = None;
        let history = vec![
            pace_snapshot("2024-01-01T00:00:00Z", PaceLevel::Slow),
            pace_snapshot("not a date", PaceLevel::VeryFast),
            missing,
        ];
        let series = DimensionSeries::extract(&history, PreferenceDimension::Pace);
        assert_eq!(series.len(), 1);
        assert_eq!(series.last_value().unwrap().value(), 0.25);
    }

    #[test]
    fn absent_dimension_yields_neutral_points() {
        let history = vec![
            pace_snapshot("2024-01-01T00:00:00Z", PaceLevel::Slow),
            pace_snapshot("2024-01-02T00:00:00Z", PaceLevel::Slow),
        ];
        let series = DimensionSeries::extract(&history, PreferenceDimension::Genre);
        assert_eq!(series.len(), 2);
        assert!(series.points().iter().all(|p| p.value == UnitScore::NEUTRAL));
    }

    #[test]
    fn extraction_is_deterministic() {
        let history = vec![
            pace_snapshot("2024-01-02T00:00:00Z", PaceLevel::Fast),
            pace_snapshot("2024-01-01T00:00:00Z", PaceLevel::Slow),
        ];
        let a = DimensionSeries::extract(&history, PreferenceDimension::Pace);
        let b = DimensionSeries::extract(&history, PreferenceDimension::Pace);
        assert_eq!(a, b);
    }

    #[test]
    fn span_and_offsets_are_in_days() {
        let history = vec![
            pace_snapshot("2024-01-01T00:00:00Z", PaceLevel::Slow),
            pace_snapshot("2024-01-01T12:00:00Z", PaceLevel::Slow),
            pace_snapshot("2024-01-11T00:00:00Z", PaceLevel::Fast),
        ];
        let series = DimensionSeries::extract(&history, PreferenceDimension::Pace);
        assert!((series.span_days() - 10.0).abs() < 1e-12);
        let xs: Vec<f64> = series.day_offsets().iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, vec![0.0, 0.5, 10.0]);
    }

    #[test]
    fn empty_series_has_no_span() {
        let series = DimensionSeries::extract(&[], PreferenceDimension::Audio);
        assert!(series.is_empty());
        assert_eq!(series.span_days(), 0.0);
        assert!(series.day_offsets().is_empty());
        assert!(series.last_value().is_none());
    }
}
