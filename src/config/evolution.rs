//! Trend and forecast tuning

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::evolution::{
    EvolutionSummarizer, Forecaster, ShiftDetector, TrendAnalyzer, DEFAULT_DETECTION_THRESHOLD,
    DEFAULT_FORECAST_WINDOW_DAYS, DEFAULT_MAX_POTENTIAL_SHIFTS, DEFAULT_MAX_SIGNIFICANT_SHIFTS,
    DEFAULT_MAX_SUMMARY_CHANGES, DEFAULT_MIN_HISTORY_POINTS, DEFAULT_RECENT_WINDOW,
    DEFAULT_SHIFT_THRESHOLD, DEFAULT_SUMMARY_RANGE_DAYS,
};

/// Evolution analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionConfig {
    /// Days projected ahead by the forecaster
    #[serde(default = "default_forecast_window_days")]
    pub forecast_window_days: u32,

    /// Minimum samples per dimension before forecasting
    #[serde(default = "default_min_history_points")]
    pub min_history_points: usize,

    /// Trend magnitude that counts as a significant shift
    #[serde(default = "default_trend_detection_threshold")]
    pub trend_detection_threshold: f64,

    /// Relative forecast change that counts as a potential shift
    #[serde(default = "default_forecast_shift_threshold")]
    pub forecast_shift_threshold: f64,

    /// Most recent snapshots used for the current trend
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,

    #[serde(default = "default_max_significant_shifts")]
    pub max_significant_shifts: usize,

    #[serde(default = "default_max_potential_shifts")]
    pub max_potential_shifts: usize,

    #[serde(default = "default_max_summary_changes")]
    pub max_summary_changes: usize,

    /// Summary window when none is requested
    #[serde(default = "default_summary_range_days")]
    pub summary_range_days: u32,
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.forecast_window_days == 0 {
            return Err(ValidationError::MustBePositive("evolution.forecast_window_days"));
        }
        if self.min_history_points == 0 {
            return Err(ValidationError::MustBePositive("evolution.min_history_points"));
        }
        if self.summary_range_days == 0 {
            return Err(ValidationError::MustBePositive("evolution.summary_range_days"));
        }
        if self.recent_window < 2 {
            return Err(ValidationError::RecentWindowTooSmall);
        }
        check_threshold("evolution.trend_detection_threshold", self.trend_detection_threshold)?;
        check_threshold("evolution.forecast_shift_threshold", self.forecast_shift_threshold)?;
        Ok(())
    }

    pub fn trend_analyzer(&self) -> TrendAnalyzer {
        TrendAnalyzer::new(self.trend_detection_threshold, self.max_significant_shifts)
    }

    pub fn forecaster(&self) -> Forecaster {
        Forecaster::new(
            self.forecast_window_days,
            self.min_history_points,
            self.forecast_shift_threshold,
            self.max_potential_shifts,
        )
    }

    pub fn shift_detector(&self) -> ShiftDetector {
        ShiftDetector::new(self.trend_analyzer(), self.forecaster(), self.recent_window)
    }

    pub fn summarizer(&self) -> EvolutionSummarizer {
        EvolutionSummarizer::new(self.trend_analyzer(), self.forecaster(), self.max_summary_changes)
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ValidationError::ThresholdOutOfRange { field, value })
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            forecast_window_days: default_forecast_window_days(),
            min_history_points: default_min_history_points(),
            trend_detection_threshold: default_trend_detection_threshold(),
            forecast_shift_threshold: default_forecast_shift_threshold(),
            recent_window: default_recent_window(),
            max_significant_shifts: default_max_significant_shifts(),
            max_potential_shifts: default_max_potential_shifts(),
            max_summary_changes: default_max_summary_changes(),
            summary_range_days: default_summary_range_days(),
        }
    }
}

fn default_forecast_window_days() -> u32 {
    DEFAULT_FORECAST_WINDOW_DAYS
}

fn default_min_history_points() -> usize {
    DEFAULT_MIN_HISTORY_POINTS
}

fn default_trend_detection_threshold() -> f64 {
    DEFAULT_DETECTION_THRESHOLD
}

fn default_forecast_shift_threshold() -> f64 {
    DEFAULT_SHIFT_THRESHOLD
}

fn default_recent_window() -> usize {
    DEFAULT_RECENT_WINDOW
}

fn default_max_significant_shifts() -> usize {
    DEFAULT_MAX_SIGNIFICANT_SHIFTS
}

fn default_max_potential_shifts() -> usize {
    DEFAULT_MAX_POTENTIAL_SHIFTS
}

fn default_max_summary_changes() -> usize {
    DEFAULT_MAX_SUMMARY_CHANGES
}

fn default_summary_range_days() -> u32 {
    DEFAULT_SUMMARY_RANGE_DAYS
}
