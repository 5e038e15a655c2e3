//! Evolution module - Trend detection and forecasting
//!
//! Turns a viewer's preference history into per-dimension time series and
//! analyses them three ways:
//!
//! - [`TrendAnalyzer`] fits a least-squares line to each dimension and
//!   classifies it as increasing, decreasing or stable
//! - [`Forecaster`] extrapolates each dimension a fixed number of days ahead
//! - [`EvolutionSummarizer`] merges both into a ranked list of changes
//!
//! [`ShiftDetector`] pairs a trend over the most recent snapshots with a
//! forecast over the full history.

mod forecast;
mod regression;
mod series;
mod shift;
mod summary;
mod trend;

pub use forecast::{
    DimensionForecast, ForecastAnalysis, ForecastReport, Forecaster, PotentialShift, Projection,
    DEFAULT_FORECAST_WINDOW_DAYS, DEFAULT_MAX_POTENTIAL_SHIFTS, DEFAULT_MIN_HISTORY_POINTS,
    DEFAULT_SHIFT_THRESHOLD, STABLE_CHANGE_THRESHOLD,
};
pub use regression::LinearFit;
pub use series::{DimensionSeries, SeriesPoint};
pub use shift::{ShiftDetector, ShiftReport, DEFAULT_RECENT_WINDOW};
pub use summary::{
    EvolutionSummarizer, EvolutionSummary, SignificantChange, SummaryDetails,
    DEFAULT_MAX_SUMMARY_CHANGES, DEFAULT_SUMMARY_RANGE_DAYS,
};
pub use trend::{
    classify, overall_stability, trend_confidence, DimensionTrend, SignificantShift,
    TrendAnalysis, TrendAnalyzer, TrendDirection, TrendReport, DEFAULT_DETECTION_THRESHOLD,
    DEFAULT_MAX_SIGNIFICANT_SHIFTS, MAGNITUDE_SCALE, MIN_TREND_CORRELATION,
    STABLE_SLOPE_THRESHOLD,
};
