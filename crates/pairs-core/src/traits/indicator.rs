//! Indicator trait definitions.

use crate::error::PairsError;

/// Trait for rolling-window indicators over a numeric series.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (prices or spread values)
    ///
    /// # Returns
    /// One value per complete window, so `data.len() - period() + 1`
    /// values, or none if the data is shorter than the window.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), PairsError> {
        if data.len() < self.period() {
            return Err(PairsError::InsufficientHistory {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}
