//! Volatility indicators.

use pairs_core::traits::Indicator;

/// Arithmetic mean. Returns `None` for empty input.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom
/// (0 = population, 1 = sample).
///
/// Returns `None` when there are not more than `ddof` observations.
pub fn std_dev(data: &[f64], ddof: usize) -> Option<f64> {
    if data.len() <= ddof {
        return None;
    }
    let m = mean(data)?;
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - ddof) as f64;
    Some(variance.sqrt())
}

/// Rolling standard deviation.
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
    ddof: usize,
}

impl StdDev {
    /// Create a rolling sample standard deviation (N - 1 denominator).
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period, ddof: 1 }
    }

    /// Create a rolling population standard deviation (N denominator).
    pub fn population(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period, ddof: 0 }
    }
}

impl Indicator for StdDev {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        data.windows(self.period)
            .map(|window| std_dev(window, self.ddof).unwrap_or(f64::NAN))
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_std_dev() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] is sqrt(32 / 7)
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = std_dev(&data, 1).unwrap();
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);

        // Population std is exactly 2
        assert!((std_dev(&data, 0).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_needs_enough_points() {
        assert!(std_dev(&[1.0], 1).is_none());
        assert!(std_dev(&[], 0).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_rolling_std_dev() {
        let indicator = StdDev::new(3);
        let result = indicator.calculate(&[1.0, 2.0, 3.0, 3.0, 3.0]);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 1.0).abs() < 1e-12);
        assert!(result[2].abs() < 1e-12);
    }
}
