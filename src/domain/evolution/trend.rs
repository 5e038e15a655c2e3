//! Trend classification over recent preference history

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, error};

use super::regression::LinearFit;
use super::series::DimensionSeries;
use crate::domain::foundation::{round_to, DomainError, Timestamp, UnitScore};
use crate::domain::preference::{PreferenceDimension, PreferenceSnapshot};

/// Slopes below this (value per day) are treated as no movement.
pub const STABLE_SLOPE_THRESHOLD: f64 = 0.05;

/// Fits weaker than this |r| are treated as no movement.
pub const MIN_TREND_CORRELATION: f64 = 0.3;

/// Magnitude = |slope| x this, capped at 1.
pub const MAGNITUDE_SCALE: f64 = 2.0;

/// Default magnitude above which a trend counts as a significant shift.
pub const DEFAULT_DETECTION_THRESHOLD: f64 = 0.2;

/// Default cap on reported significant shifts.
pub const DEFAULT_MAX_SIGNIFICANT_SHIFTS: usize = 3;

/// Absorbs floating-point error when comparing against a threshold.
const THRESHOLD_TOLERANCE: f64 = 1e-9;

const SAMPLE_WEIGHT: f64 = 0.4;
const CORRELATION_WEIGHT: f64 = 0.4;
const SPAN_WEIGHT: f64 = 0.2;
const FULL_CONFIDENCE_SAMPLES: f64 = 10.0;
const FULL_CONFIDENCE_SPAN_DAYS: f64 = 30.0;

/// `value < threshold`, with values within tolerance of the threshold counting as reaching it.
pub(crate) fn is_below(value: f64, threshold: f64) -> bool {
    value < threshold - THRESHOLD_TOLERANCE
}

/// Direction of change in a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    /// The dimension could not be analysed
    Error,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Maps a fitted line to a direction and a 0-1 magnitude.
pub fn classify(fit: &LinearFit) -> (TrendDirection, UnitScore) {
    if is_below(fit.slope.abs(), STABLE_SLOPE_THRESHOLD)
        || is_below(fit.correlation.abs(), MIN_TREND_CORRELATION)
    {
        return (TrendDirection::Stable, UnitScore::ZERO);
    }

    let direction = if fit.slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };
    (direction, UnitScore::new(fit.slope.abs() * MAGNITUDE_SCALE))
}

/// Heuristic confidence in a fitted trend, rounded to two places.
///
/// Blends sample count (full at 10), fit strength, and time span (full at
/// 30 days) with weights 0.4 / 0.4 / 0.2.
pub fn trend_confidence(series: &DimensionSeries, correlation: f64) -> UnitScore {
    let sample_factor = (series.len() as f64 / FULL_CONFIDENCE_SAMPLES).min(1.0);
    let correlation_factor = correlation.abs().min(1.0);
    let span_factor = if series.len() >= 2 {
        (series.span_days() / FULL_CONFIDENCE_SPAN_DAYS).clamp(0.0, 1.0)
    } else {
        0.0
    };

    UnitScore::new(
        sample_factor * SAMPLE_WEIGHT
            + correlation_factor * CORRELATION_WEIGHT
            + span_factor * SPAN_WEIGHT,
    )
    .rounded(2)
}

/// Trend of a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionTrend {
    pub direction: TrendDirection,
    pub magnitude: UnitScore,
    pub correlation: f64,
    pub confidence: UnitScore,
    /// Points the trend was fitted on; zero when the dimension had no data.
    pub samples: usize,
}

impl DimensionTrend {
    /// Stable with zero magnitude; used when there is too little data to fit.
    pub fn stable(samples: usize) -> Self {
        Self {
            direction: TrendDirection::Stable,
            magnitude: UnitScore::ZERO,
            correlation: 0.0,
            confidence: UnitScore::ZERO,
            samples,
        }
    }

    /// Marks a dimension whose computation failed.
    pub fn failed(samples: usize) -> Self {
        Self {
            direction: TrendDirection::Error,
            ..Self::stable(samples)
        }
    }
}

/// A dimension whose trend magnitude exceeded the detection threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificantShift {
    pub dimension: PreferenceDimension,
    pub direction: TrendDirection,
    pub magnitude: UnitScore,
    pub confidence: UnitScore,
}

/// Successful trend analysis across all tracked dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub analyzed_at: Timestamp,
    pub dimension_trends: BTreeMap<PreferenceDimension, DimensionTrend>,
    pub significant_shifts: Vec<SignificantShift>,
    /// 1 - mean magnitude; higher means steadier preferences.
    pub overall_stability: UnitScore,
}

/// Outcome of a trend calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendReport {
    InsufficientData,
    Success(TrendAnalysis),
}

impl TrendReport {
    pub fn analysis(&self) -> Option<&TrendAnalysis> {
        match self {
            Self::Success(analysis) => Some(analysis),
            Self::InsufficientData => None,
        }
    }
}

/// Computes per-dimension trends from a window of snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAnalyzer {
    detection_threshold: f64,
    max_significant_shifts: usize,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_DETECTION_THRESHOLD, DEFAULT_MAX_SIGNIFICANT_SHIFTS)
    }
}

impl TrendAnalyzer {
    pub fn new(detection_threshold: f64, max_significant_shifts: usize) -> Self {
        Self {
            detection_threshold,
            max_significant_shifts,
        }
    }

    /// Analyses every tracked dimension over `history`.
    ///
    /// Needs at least two snapshots. A dimension that fails is reported
    /// with direction `error` and does not affect the others.
    pub fn analyze(&self, history: &[PreferenceSnapshot]) -> TrendReport {
        if history.len() < 2 {
            return TrendReport::InsufficientData;
        }

        debug!(points = history.len(), "Calculating preference trends");

        let dimension_trends: BTreeMap<_, _> = PreferenceDimension::ALL
            .iter()
            .map(|&dimension| {
                let series = DimensionSeries::extract(history, dimension);
                let trend = if series.len() < 2 {
                    DimensionTrend::stable(series.len())
                } else {
                    self.dimension_trend(&series).unwrap_or_else(|e| {
                        error!(dimension = %dimension, error = %e, "Trend calculation failed");
                        DimensionTrend::failed(series.len())
                    })
                };
                (dimension, trend)
            })
            .collect();

        let significant_shifts = self.significant_shifts(&dimension_trends);
        let overall_stability = overall_stability(&dimension_trends);

        TrendReport::Success(TrendAnalysis {
            analyzed_at: Timestamp::now(),
            dimension_trends,
            significant_shifts,
            overall_stability,
        })
    }

    /// Fits and classifies one dimension.
    pub fn dimension_trend(&self, series: &DimensionSeries) -> Result<DimensionTrend, DomainError> {
        let fit = LinearFit::of(series)?;
        let (direction, magnitude) = classify(&fit);

        Ok(DimensionTrend {
            direction,
            magnitude: magnitude.rounded(2),
            correlation: round_to(fit.correlation, 2),
            confidence: trend_confidence(series, fit.correlation),
            samples: series.len(),
        })
    }

    fn significant_shifts(
        &self,
        trends: &BTreeMap<PreferenceDimension, DimensionTrend>,
    ) -> Vec<SignificantShift> {
        let mut shifts: Vec<SignificantShift> = trends
            .iter()
            .filter(|(_, t)| t.magnitude.value() > self.detection_threshold)
            .map(|(&dimension, t)| SignificantShift {
                dimension,
                direction: t.direction,
                magnitude: t.magnitude,
                confidence: t.confidence,
            })
            .collect();

        shifts.sort_by(|a, b| {
            b.magnitude
                .partial_cmp(&a.magnitude)
                .unwrap_or(Ordering::Equal)
        });
        shifts.truncate(self.max_significant_shifts);
        shifts
    }
}

/// 1 minus the mean magnitude across dimensions; neutral when there are none.
pub fn overall_stability(trends: &BTreeMap<PreferenceDimension, DimensionTrend>) -> UnitScore {
    if trends.is_empty() {
        return UnitScore::NEUTRAL;
    }
    let mean = trends.values().map(|t| t.magnitude.value()).sum::<f64>() / trends.len() as f64;
    UnitScore::new(1.0 - mean).rounded(2)
}
