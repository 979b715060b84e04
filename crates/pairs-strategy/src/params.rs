//! Strategy parameters.

use pairs_core::{PairsError, PairsResult};
use serde::{Deserialize, Serialize};

/// Configuration for the spread z-score strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairsParams {
    /// Rolling window for the spread mean and standard deviation
    pub lookback: usize,
    /// Open a position when |z| exceeds this
    pub entry_threshold: f64,
    /// Close the position when |z| falls below this
    pub exit_threshold: f64,
}

impl Default for PairsParams {
    fn default() -> Self {
        Self {
            lookback: 20,
            entry_threshold: 2.0,
            exit_threshold: 0.5,
        }
    }
}

impl PairsParams {
    /// Validate the configuration.
    pub fn validate(&self) -> PairsResult<()> {
        if self.lookback < 2 {
            return Err(PairsError::invalid(format!(
                "lookback must be at least 2, got {}",
                self.lookback
            )));
        }
        if !self.entry_threshold.is_finite() || !self.exit_threshold.is_finite() {
            return Err(PairsError::invalid("thresholds must be finite"));
        }
        if self.exit_threshold < 0.0 {
            return Err(PairsError::invalid(format!(
                "exit threshold must be non-negative, got {}",
                self.exit_threshold
            )));
        }
        if self.exit_threshold >= self.entry_threshold {
            return Err(PairsError::invalid(format!(
                "exit threshold ({}) must be less than entry threshold ({})",
                self.exit_threshold, self.entry_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PairsParams::default().validate().is_ok());
    }

    #[test]
    fn test_exit_must_be_below_entry() {
        let params = PairsParams {
            exit_threshold: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(PairsError::InvalidParameters(_))
        ));

        let params = PairsParams {
            exit_threshold: 3.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_lookback_bounds() {
        let params = PairsParams {
            lookback: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = PairsParams {
            lookback: 1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_exit_rejected() {
        let params = PairsParams {
            exit_threshold: -0.1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
