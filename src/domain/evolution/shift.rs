//! Combined recent-trend and forecast detection

use serde::{Deserialize, Serialize};

use super::forecast::{ForecastReport, Forecaster};
use super::trend::{TrendAnalyzer, TrendReport};
use crate::domain::preference::PreferenceSnapshot;

/// Snapshots considered when computing the current trend.
pub const DEFAULT_RECENT_WINDOW: usize = 6;

/// Current trend plus predicted shift for one history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub current_trend: TrendReport,
    pub predicted_shift: ForecastReport,
}

/// Runs the trend analyzer over the most recent snapshots and the
/// forecaster over the whole history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftDetector {
    trend: TrendAnalyzer,
    forecaster: Forecaster,
    recent_window: usize,
}

impl Default for ShiftDetector {
    fn default() -> Self {
        Self::new(TrendAnalyzer::default(), Forecaster::default(), DEFAULT_RECENT_WINDOW)
    }
}

impl ShiftDetector {
    pub fn new(trend: TrendAnalyzer, forecaster: Forecaster, recent_window: usize) -> Self {
        Self {
            trend,
            forecaster,
            recent_window,
        }
    }

    /// `history` is expected oldest first; the last `recent_window`
    /// entries form the trend window.
    pub fn detect(&self, history: &[PreferenceSnapshot]) -> ShiftReport {
        let start = history.len().saturating_sub(self.recent_window);
        ShiftReport {
            current_trend: self.trend.analyze(&history[start..]),
            predicted_shift: self.forecaster.forecast(history),
        }
    }
}
