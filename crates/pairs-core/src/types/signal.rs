//! Z-score signal series.

use serde::{Deserialize, Serialize};

/// Rolling z-score of the spread, one slot per aligned bar.
///
/// `None` marks bars without a tradable signal: the warm-up window and
/// bars whose rolling standard deviation is zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZScoreSeries {
    values: Vec<Option<f64>>,
}

impl ZScoreSeries {
    /// Wrap precomputed values. Non-finite values are stored as `None`.
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|v| v.filter(|z| z.is_finite()))
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Z-score at `index`, if defined.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Number of defined slots.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_becomes_undefined() {
        let z = ZScoreSeries::new(vec![None, Some(f64::NAN), Some(1.5), Some(f64::INFINITY)]);
        assert_eq!(z.len(), 4);
        assert_eq!(z.get(1), None);
        assert_eq!(z.get(2), Some(1.5));
        assert_eq!(z.get(3), None);
        assert_eq!(z.get(10), None);
        assert_eq!(z.defined_count(), 1);
    }
}
