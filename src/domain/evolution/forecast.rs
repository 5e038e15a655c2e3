//! Linear extrapolation of preference values

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, error};

use super::regression::LinearFit;
use super::series::DimensionSeries;
use super::trend::{is_below, trend_confidence, TrendDirection};
use crate::domain::foundation::{round_to, DomainError, Timestamp, UnitScore};
use crate::domain::preference::{PreferenceDimension, PreferenceSnapshot};

/// Default days projected ahead.
pub const DEFAULT_FORECAST_WINDOW_DAYS: u32 = 30;

/// Default minimum samples per dimension before forecasting.
pub const DEFAULT_MIN_HISTORY_POINTS: usize = 5;

/// Default relative change above which a forecast is a potential shift.
pub const DEFAULT_SHIFT_THRESHOLD: f64 = 0.2;

/// Default cap on reported potential shifts.
pub const DEFAULT_MAX_POTENTIAL_SHIFTS: usize = 3;

/// Predicted changes smaller than this are `stable`.
pub const STABLE_CHANGE_THRESHOLD: f64 = 0.05;

/// Projected value of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub predicted_value: UnitScore,
    pub direction: TrendDirection,
    pub confidence: UnitScore,
}

/// Forecast of a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionForecast {
    pub current_value: UnitScore,
    pub predicted_value: UnitScore,
    pub change_direction: TrendDirection,
    pub confidence: UnitScore,
    pub predicted_at: Timestamp,
    pub prediction_window_days: u32,
}

/// A forecast whose relative change exceeded the shift threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialShift {
    pub dimension: PreferenceDimension,
    pub current_value: UnitScore,
    pub predicted_value: UnitScore,
    /// |predicted - current| / current x 100, one decimal place.
    pub change_percentage: f64,
    pub direction: TrendDirection,
    pub confidence: UnitScore,
}

/// Successful forecast across all dimensions with enough history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastAnalysis {
    pub forecasted_at: Timestamp,
    pub forecast_window_days: u32,
    pub dimension_forecasts: BTreeMap<PreferenceDimension, DimensionForecast>,
    pub potential_shifts: Vec<PotentialShift>,
}

/// Outcome of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastReport {
    InsufficientData,
    Success(ForecastAnalysis),
}

impl ForecastReport {
    pub fn analysis(&self) -> Option<&ForecastAnalysis> {
        match self {
            Self::Success(analysis) => Some(analysis),
            Self::InsufficientData => None,
        }
    }
}

/// Projects each dimension forward along its fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecaster {
    window_days: u32,
    min_history_points: usize,
    shift_threshold: f64,
    max_potential_shifts: usize,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(
            DEFAULT_FORECAST_WINDOW_DAYS,
            DEFAULT_MIN_HISTORY_POINTS,
            DEFAULT_SHIFT_THRESHOLD,
            DEFAULT_MAX_POTENTIAL_SHIFTS,
        )
    }
}

impl Forecaster {
    pub fn new(
        window_days: u32,
        min_history_points: usize,
        shift_threshold: f64,
        max_potential_shifts: usize,
    ) -> Self {
        Self {
            window_days,
            min_history_points,
            shift_threshold,
            max_potential_shifts,
        }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn min_history_points(&self) -> usize {
        self.min_history_points
    }

    /// Extrapolates the last value by `slope x window`, clamped to [0, 1].
    ///
    /// With fewer than two points the last value (or 0.5) is carried
    /// forward as stable with zero confidence.
    pub fn project(&self, series: &DimensionSeries) -> Result<Projection, DomainError> {
        let last = series.last_value().unwrap_or(UnitScore::NEUTRAL);
        if series.len() < 2 {
            return Ok(Projection {
                predicted_value: last,
                direction: TrendDirection::Stable,
                confidence: UnitScore::ZERO,
            });
        }

        let fit = LinearFit::of(series)?;
        let predicted = UnitScore::new(last.value() + fit.slope * f64::from(self.window_days));
        let change = predicted.value() - last.value();

        let direction = if is_below(change.abs(), STABLE_CHANGE_THRESHOLD) {
            TrendDirection::Stable
        } else if change > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };

        Ok(Projection {
            predicted_value: predicted.rounded(2),
            direction,
            confidence: trend_confidence(series, fit.correlation),
        })
    }

    /// Forecasts every dimension with at least `min_history_points` samples.
    ///
    /// A dimension whose projection fails is logged and left out.
    pub fn forecast(&self, history: &[PreferenceSnapshot]) -> ForecastReport {
        if history.len() < self.min_history_points {
            return ForecastReport::InsufficientData;
        }

        debug!(points = history.len(), "Forecasting preference trends");

        let forecasted_at = Timestamp::now();
        let mut dimension_forecasts = BTreeMap::new();

        for dimension in PreferenceDimension::ALL {
            let series = DimensionSeries::extract(history, dimension);
            if series.len() < self.min_history_points {
                continue;
            }
            let Some(current_value) = series.last_value() else {
                continue;
            };

            match self.project(&series) {
                Ok(projection) => {
                    dimension_forecasts.insert(
                        dimension,
                        DimensionForecast {
                            current_value,
                            predicted_value: projection.predicted_value,
                            change_direction: projection.direction,
                            confidence: projection.confidence,
                            predicted_at: forecasted_at,
                            prediction_window_days: self.window_days,
                        },
                    );
                }
                Err(e) => {
                    error!(dimension = %dimension, error = %e, "Forecast failed");
                }
            }
        }

        let potential_shifts = self.potential_shifts(&dimension_forecasts);

        ForecastReport::Success(ForecastAnalysis {
            forecasted_at,
            forecast_window_days: self.window_days,
            dimension_forecasts,
            potential_shifts,
        })
    }

    fn potential_shifts(
        &self,
        forecasts: &BTreeMap<PreferenceDimension, DimensionForecast>,
    ) -> Vec<PotentialShift> {
        let mut shifts: Vec<PotentialShift> = forecasts
            .iter()
            .filter_map(|(&dimension, f)| {
                let current = f.current_value.value();
                if current == 0.0 {
                    return None;
                }
                let change = ((f.predicted_value.value() - current) / current).abs();
                (change > self.shift_threshold).then(|| PotentialShift {
                    dimension,
                    current_value: f.current_value,
                    predicted_value: f.predicted_value,
                    change_percentage: round_to(change * 100.0, 1),
                    direction: f.change_direction,
                    confidence: f.confidence,
                })
            })
            .collect();

        shifts.sort_by(|a, b| {
            b.change_percentage
                .partial_cmp(&a.change_percentage)
                .unwrap_or(Ordering::Equal)
        });
        shifts.truncate(self.max_potential_shifts);
        shifts
    }
}
