//! Evolution summary over a time window

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::forecast::{ForecastReport, Forecaster};
use super::trend::{TrendAnalyzer, TrendDirection, TrendReport};
use crate::domain::foundation::{Timestamp, UnitScore, UserId};
use crate::domain::preference::{PreferenceDimension, PreferenceSnapshot};

/// Default look-back window in days.
pub const DEFAULT_SUMMARY_RANGE_DAYS: u32 = 90;

/// Default cap on merged significant changes.
pub const DEFAULT_MAX_SUMMARY_CHANGES: usize = 5;

/// A noteworthy change, either observed or predicted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignificantChange {
    ObservedTrend {
        dimension: PreferenceDimension,
        direction: TrendDirection,
        magnitude: UnitScore,
        confidence: UnitScore,
    },
    PredictedShift {
        dimension: PreferenceDimension,
        direction: TrendDirection,
        change_percentage: f64,
        confidence: UnitScore,
    },
}

impl SignificantChange {
    pub fn confidence(&self) -> UnitScore {
        match self {
            Self::ObservedTrend { confidence, .. } | Self::PredictedShift { confidence, .. } => {
                *confidence
            }
        }
    }

    pub fn dimension(&self) -> PreferenceDimension {
        match self {
            Self::ObservedTrend { dimension, .. } | Self::PredictedShift { dimension, .. } => {
                *dimension
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDetails {
    pub user_id: UserId,
    pub time_range_days: u32,
    pub generated_at: Timestamp,
    /// Snapshots inside the window.
    pub history_points: usize,
    pub overall_stability: UnitScore,
    pub significant_changes: Vec<SignificantChange>,
    pub trend: TrendReport,
    pub forecast: ForecastReport,
}

/// Outcome of a summary request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvolutionSummary {
    NoData { message: String },
    NoDataInRange { message: String },
    Success(SummaryDetails),
}

impl EvolutionSummary {
    pub fn details(&self) -> Option<&SummaryDetails> {
        match self {
            Self::Success(details) => Some(details),
            _ => None,
        }
    }
}

/// Merges a windowed trend with a full-history forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionSummarizer {
    trend: TrendAnalyzer,
    forecaster: Forecaster,
    max_changes: usize,
}

impl Default for EvolutionSummarizer {
    fn default() -> Self {
        Self::new(
            TrendAnalyzer::default(),
            Forecaster::default(),
            DEFAULT_MAX_SUMMARY_CHANGES,
        )
    }
}

impl EvolutionSummarizer {
    pub fn new(trend: TrendAnalyzer, forecaster: Forecaster, max_changes: usize) -> Self {
        Self {
            trend,
            forecaster,
            max_changes,
        }
    }

    /// Summarizes the snapshots captured within `days` of `now`.
    ///
    /// The trend runs on the windowed snapshots; the forecast runs on the
    /// whole `history`. Snapshots without a parseable timestamp never fall
    /// inside the window.
    pub fn summarize(
        &self,
        user_id: &UserId,
        history: &[PreferenceSnapshot],
        days: u32,
        now: Timestamp,
    ) -> EvolutionSummary {
        if history.is_empty() {
            return EvolutionSummary::NoData {
                message: "No preference history recorded".to_string(),
            };
        }

        let cutoff = now.minus_days(i64::from(days));
        let windowed: Vec<PreferenceSnapshot> = history
            .iter()
            .filter(|s| s.captured_at().is_some_and(|ts| ts >= cutoff))
            .cloned()
            .collect();

        if windowed.is_empty() {
            return EvolutionSummary::NoDataInRange {
                message: format!("No preference data within the last {} days", days),
            };
        }

        let trend = self.trend.analyze(&windowed);
        let forecast = self.forecaster.forecast(history);

        let mut significant_changes: Vec<SignificantChange> = Vec::new();
        if let Some(analysis) = trend.analysis() {
            significant_changes.extend(analysis.significant_shifts.iter().map(|s| {
                SignificantChange::ObservedTrend {
                    dimension: s.dimension,
                    direction: s.direction,
                    magnitude: s.magnitude,
                    confidence: s.confidence,
                }
            }));
        }
        if let Some(analysis) = forecast.analysis() {
            significant_changes.extend(analysis.potential_shifts.iter().map(|s| {
                SignificantChange::PredictedShift {
                    dimension: s.dimension,
                    direction: s.direction,
                    change_percentage: s.change_percentage,
                    confidence: s.confidence,
                }
            }));
        }

        significant_changes.sort_by(|a, b| {
            b.confidence()
                .partial_cmp(&a.confidence())
                .unwrap_or(Ordering::Equal)
        });
        significant_changes.truncate(self.max_changes);

        let overall_stability = trend
            .analysis()
            .map(|a| a.overall_stability)
            .unwrap_or(UnitScore::NEUTRAL);

        EvolutionSummary::Success(SummaryDetails {
            user_id: user_id.clone(),
            time_range_days: days,
            generated_at: now,
            history_points: windowed.len(),
            overall_stability,
            significant_changes,
            trend,
            forecast,
        })
    }
}
