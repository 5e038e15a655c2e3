//! Ordinary least squares trend fitting

use serde::{Deserialize, Serialize};

use super::series::DimensionSeries;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Slope (value change per day) and Pearson correlation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub correlation: f64,
}

impl LinearFit {
    /// No trend: returned for fewer than two points or zero x-variance.
    pub const FLAT: Self = Self {
        slope: 0.0,
        correlation: 0.0,
    };

    /// Fits a line through the series, x measured in days since its first point.
    pub fn of(series: &DimensionSeries) -> Result<Self, DomainError> {
        Self::from_pairs(&series.day_offsets()).map_err(|e| {
            e.with_detail("dimension", series.dimension().key())
        })
    }

    /// Fits a line through `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// `ComputationFailed` when an input or the result is not finite.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, DomainError> {
        if pairs.len() < 2 {
            return Ok(Self::FLAT);
        }
        if pairs.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(DomainError::new(
                ErrorCode::ComputationFailed,
                "Series contains non-finite values",
            ));
        }

        let n = pairs.len() as f64;
        let x_mean = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
        let y_mean = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut ss_xy = 0.0;
        let mut ss_xx = 0.0;
        let mut ss_yy = 0.0;
        for (x, y) in pairs {
            let dx = x - x_mean;
            let dy = y - y_mean;
            ss_xy += dx * dy;
            ss_xx += dx * dx;
            ss_yy += dy * dy;
        }

        if ss_xx == 0.0 {
            return Ok(Self::FLAT);
        }

        let slope = ss_xy / ss_xx;
        let correlation = if ss_yy == 0.0 {
            0.0
        } else {
            ss_xy / (ss_xx * ss_yy).sqrt()
        };

        if !slope.is_finite() || !correlation.is_finite() {
            return Err(DomainError::new(
                ErrorCode::ComputationFailed,
                "Regression produced a non-finite result",
            ));
        }

        Ok(Self {
            slope,
            correlation: correlation.clamp(-1.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fewer_than_two_points_is_flat() {
        assert_eq!(LinearFit::from_pairs(&[]).unwrap(), LinearFit::FLAT);
        assert_eq!(LinearFit::from_pairs(&[(0.0, 0.7)]).unwrap(), LinearFit::FLAT);
    }

    #[test]
    fn zero_x_variance_is_flat() {
        let fit = LinearFit::from_pairs(&[(3.0, 0.2), (3.0, 0.8)]).unwrap();
        assert_eq!(fit, LinearFit::FLAT);
    }

    #[test]
    fn steady_rise_fits_exactly() {
        let pairs = [(0.0, 0.4), (1.0, 0.45), (2.0, 0.5), (3.0, 0.55), (4.0, 0.6)];
        let fit = LinearFit::from_pairs(&pairs).unwrap();
        assert!(approx(fit.slope, 0.05));
        assert!(approx(fit.correlation, 1.0));
    }

    #[test]
    fn decline_has_negative_slope_and_correlation() {
        let pairs = [(0.0, 0.9), (2.0, 0.7), (4.0, 0.5)];
        let fit = LinearFit::from_pairs(&pairs).unwrap();
        assert!(approx(fit.slope, -0.1));
        assert!(approx(fit.correlation, -1.0));
    }

    #[test]
    fn constant_values_have_zero_correlation() {
        let fit = LinearFit::from_pairs(&[(0.0, 0.5), (1.0, 0.5), (2.0, 0.5)]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.correlation, 0.0);
    }

    #[test]
    fn noisy_series_has_partial_correlation() {
        let pairs = [(0.0, 0.5), (1.0, 0.9), (2.0, 0.4), (3.0, 0.8)];
        let fit = LinearFit::from_pairs(&pairs).unwrap();
        assert!(fit.correlation > 0.0 && fit.correlation < 1.0);
    }

    #[test]
    fn non_finite_input_fails() {
        let err = LinearFit::from_pairs(&[(0.0, f64::NAN), (1.0, 0.5)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ComputationFailed);
    }
}
