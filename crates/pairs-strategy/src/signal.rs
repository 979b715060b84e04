//! Rolling z-score of the hedged spread.

use pairs_core::traits::Indicator;
use pairs_core::{PairsError, PairsResult, ZScoreSeries};
use pairs_indicators::{Sma, StdDev};

use crate::PairsParams;

/// Relative tolerance below which a rolling standard deviation counts as zero.
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Turns a spread series into a rolling z-score.
#[derive(Debug, Clone)]
pub struct SpreadSignalGenerator {
    lookback: usize,
    mean: Sma,
    std_dev: StdDev,
}

impl SpreadSignalGenerator {
    /// Create a generator, validating the parameters first.
    pub fn new(params: &PairsParams) -> PairsResult<Self> {
        params.validate()?;
        Ok(Self {
            lookback: params.lookback,
            mean: Sma::new(params.lookback),
            std_dev: StdDev::new(params.lookback),
        })
    }

    /// Window length.
    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Compute `(spread - rolling_mean) / rolling_std` for every bar.
    ///
    /// Each window ends at (and includes) the current bar. Slots `0..lookback`
    /// are undefined; the first full window closes at `lookback - 1`, but
    /// trading starts on the bar after it. Bars whose window has zero
    /// variance or contains non-finite values are undefined as well.
    pub fn generate(&self, spread: &[f64]) -> PairsResult<ZScoreSeries> {
        if spread.len() <= self.lookback {
            return Err(PairsError::InsufficientHistory {
                required: self.lookback,
                available: spread.len(),
            });
        }

        let means = self.mean.calculate(spread);
        let stds = self.std_dev.calculate(spread);
        let offset = self.lookback - 1;

        let values = spread
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                if i < self.lookback {
                    return None;
                }
                let mean = means[i - offset];
                let std = stds[i - offset];
                if !std.is_finite() || std <= ZERO_VARIANCE_TOLERANCE * mean.abs().max(1.0) {
                    return None;
                }
                Some((value - mean) / std)
            })
            .collect();

        Ok(ZScoreSeries::new(values))
    }
}
