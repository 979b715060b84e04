//! Hedge-ratio estimation by ordinary least squares.
//!
//! Fits `price1 = hedge_ratio * price2 + intercept` over the full aligned
//! history. The fit uses every bar of the run, including bars after any given
//! simulated day, so the resulting ratio is an in-sample parameter.

use pairs_core::{PairsError, PairsResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Relative tolerance below which the regressor is treated as constant.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Result of a hedge-ratio fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeFit {
    /// Slope of price1 on price2
    pub hedge_ratio: f64,
    /// Regression intercept
    pub intercept: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Number of observations used
    pub observations: usize,
}

impl HedgeFit {
    /// Spread implied by the fit: `price1 - hedge_ratio * price2`.
    ///
    /// The intercept is not subtracted; the rolling mean absorbs it.
    pub fn spread(&self, prices1: &[f64], prices2: &[f64]) -> Vec<f64> {
        prices1
            .iter()
            .zip(prices2)
            .map(|(p1, p2)| p1 - self.hedge_ratio * p2)
            .collect()
    }
}

/// OLS estimator for the pair's hedge ratio.
#[derive(Debug, Clone, Default)]
pub struct HedgeRatioEstimator;

impl HedgeRatioEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Fit price1 on price2 with an intercept.
    ///
    /// Pairs where either price is non-finite are skipped. Fails with
    /// `RegressionFailure` if the series lengths differ, fewer than two valid
    /// pairs remain, or price2 is constant (singular design matrix).
    pub fn fit(&self, prices1: &[f64], prices2: &[f64]) -> PairsResult<HedgeFit> {
        if prices1.len() != prices2.len() {
            return Err(PairsError::regression(format!(
                "series lengths differ ({} vs {})",
                prices1.len(),
                prices2.len()
            )));
        }

        let valid: Vec<(f64, f64)> = prices1
            .iter()
            .zip(prices2)
            .filter(|(y, x)| y.is_finite() && x.is_finite())
            .map(|(&y, &x)| (y, x))
            .collect();

        if valid.len() < 2 {
            return Err(PairsError::regression(format!(
                "need at least 2 valid observations, have {}",
                valid.len()
            )));
        }

        let n = valid.len() as f64;
        let mean_y = valid.iter().map(|(y, _)| y).sum::<f64>() / n;
        let mean_x = valid.iter().map(|(_, x)| x).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (y, x) in &valid {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        let scale = mean_x.abs().max(1.0);
        if sxx <= SINGULAR_TOLERANCE * scale * scale * n {
            return Err(PairsError::regression(
                "design matrix is singular: second series is constant",
            ));
        }

        let hedge_ratio = sxy / sxx;
        let intercept = mean_y - hedge_ratio * mean_x;
        let r_squared = if syy > 0.0 {
            (sxy * sxy) / (sxx * syy)
        } else {
            0.0
        };

        if !hedge_ratio.is_finite() || !intercept.is_finite() {
            return Err(PairsError::regression("fit produced non-finite coefficients"));
        }

        debug!(
            hedge_ratio,
            intercept,
            r_squared,
            observations = valid.len(),
            "Hedge ratio fitted"
        );

        Ok(HedgeFit {
            hedge_ratio,
            intercept,
            r_squared,
            observations: valid.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_linear_relationship() {
        let x: Vec<f64> = (0..50).map(|i| 50.0 + i as f64 * 0.7).collect();
        let y: Vec<f64> = x.iter().map(|v| 1.5 * v + 10.0).collect();

        let fit = HedgeRatioEstimator::new().fit(&y, &x).unwrap();
        assert!((fit.hedge_ratio - 1.5).abs() < 1e-9);
        assert!((fit.intercept - 10.0).abs() < 1e-7);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);

        // Spread collapses to the intercept
        let spread = fit.spread(&y, &x);
        assert!(spread.iter().all(|s| (s - 10.0).abs() < 1e-7));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let x: Vec<f64> = (0..100).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, v)| 0.8 * v + (i as f64 * 1.7).cos())
            .collect();

        let estimator = HedgeRatioEstimator::new();
        let a = estimator.fit(&y, &x).unwrap();
        let b = estimator.fit(&y, &x).unwrap();
        assert_eq!(a.hedge_ratio.to_bits(), b.hedge_ratio.to_bits());
    }

    #[test]
    fn test_constant_regressor_is_singular() {
        let x = vec![42.0; 30];
        let y: Vec<f64> = (0..30).map(|i| i as f64).collect();

        let err = HedgeRatioEstimator::new().fit(&y, &x).unwrap_err();
        assert!(matches!(err, PairsError::RegressionFailure(_)));
    }

    #[test]
    fn test_no_valid_values() {
        let x = vec![f64::NAN; 10];
        let y = vec![1.0; 10];

        let err = HedgeRatioEstimator::new().fit(&y, &x).unwrap_err();
        assert!(matches!(err, PairsError::RegressionFailure(_)));
    }

    #[test]
    fn test_length_mismatch() {
        let err = HedgeRatioEstimator::new()
            .fit(&[1.0, 2.0, 3.0], &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, PairsError::RegressionFailure(_)));
    }
}
