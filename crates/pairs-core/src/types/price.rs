//! Daily price series types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date
    pub date: NaiveDate,
    /// Adjusted close price
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// Whether the price is usable (finite).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.price.is_finite()
    }
}

/// Ordered price history for one ticker.
///
/// Dates are strictly increasing with no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Ticker symbol
    pub ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series from points that are already in date order.
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, DataError> {
        let ticker = ticker.into();
        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(DataError::ParseError(format!(
                "{}: dates not strictly increasing at {}",
                ticker, pair[1].date
            )));
        }
        Ok(Self { ticker, points })
    }

    /// Create a series from points in any order, sorting them by date.
    ///
    /// Duplicate dates are rejected.
    pub fn from_unsorted(
        ticker: impl Into<String>,
        mut points: Vec<PricePoint>,
    ) -> Result<Self, DataError> {
        points.sort_by_key(|p| p.date);
        Self::new(ticker, points)
    }

    /// Keep only the points with `start <= date < end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            ticker: self.ticker.clone(),
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start && p.date < end)
                .copied()
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points as a slice.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Get the last point.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Extract prices as a vector.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Get an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }
}

/// Two price series joined onto their common dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPrices {
    /// The pair of tickers, leg 1 first
    pub tickers: [String; 2],
    /// Common trading dates, strictly increasing
    pub dates: Vec<NaiveDate>,
    /// Leg 1 prices, one per date
    pub prices1: Vec<f64>,
    /// Leg 2 prices, one per date
    pub prices2: Vec<f64>,
}

impl AlignedPrices {
    /// Build from already-aligned columns.
    pub fn new(
        tickers: [String; 2],
        dates: Vec<NaiveDate>,
        prices1: Vec<f64>,
        prices2: Vec<f64>,
    ) -> Result<Self, DataError> {
        let aligned = Self {
            tickers,
            dates,
            prices1,
            prices2,
        };
        aligned.validate()?;
        Ok(aligned)
    }

    /// Check column lengths, date ordering and that every price is finite.
    pub fn validate(&self) -> Result<(), DataError> {
        let (tickers, dates, prices1, prices2) =
            (&self.tickers, &self.dates, &self.prices1, &self.prices2);
        if dates.len() != prices1.len() || dates.len() != prices2.len() {
            return Err(DataError::Misaligned(format!(
                "column lengths differ: dates={}, {}={}, {}={}",
                dates.len(),
                tickers[0],
                prices1.len(),
                tickers[1],
                prices2.len()
            )));
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DataError::Misaligned(
                "dates not strictly increasing".to_string(),
            ));
        }
        for (ticker, prices) in [(&tickers[0], prices1), (&tickers[1], prices2)] {
            if let Some(i) = prices.iter().position(|p| !p.is_finite()) {
                return Err(DataError::Misaligned(format!(
                    "{} has a non-finite price on {}",
                    ticker, dates[i]
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First and last common date.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_series_rejects_duplicate_dates() {
        let points = vec![
            PricePoint::new(d(2024, 1, 3), 101.0),
            PricePoint::new(d(2024, 1, 2), 100.0),
            PricePoint::new(d(2024, 1, 3), 102.0),
        ];
        assert!(PriceSeries::from_unsorted("AAPL", points).is_err());
    }

    #[test]
    fn test_series_sorts_and_filters() {
        let points = vec![
            PricePoint::new(d(2024, 1, 4), 102.0),
            PricePoint::new(d(2024, 1, 2), 100.0),
            PricePoint::new(d(2024, 1, 3), 101.0),
        ];
        let series = PriceSeries::from_unsorted("AAPL", points).unwrap();
        assert_eq!(series.prices(), vec![100.0, 101.0, 102.0]);

        // End date is exclusive
        let window = series.between(d(2024, 1, 3), d(2024, 1, 4));
        assert_eq!(window.len(), 1);
        assert_eq!(window.last().unwrap().price, 101.0);
    }

    #[test]
    fn test_aligned_prices_length_check() {
        let tickers = ["A".to_string(), "B".to_string()];
        let result = AlignedPrices::new(tickers, vec![d(2024, 1, 2)], vec![1.0], vec![]);
        assert!(matches!(result, Err(DataError::Misaligned(_))));
    }

    #[test]
    fn test_aligned_prices_rejects_non_finite() {
        let tickers = ["A".to_string(), "B".to_string()];
        let dates = vec![d(2024, 1, 2), d(2024, 1, 3)];
        let result = AlignedPrices::new(
            tickers.clone(),
            dates.clone(),
            vec![1.0, f64::NAN],
            vec![2.0, 2.1],
        );
        assert!(matches!(result, Err(DataError::Misaligned(_))));

        let result = AlignedPrices::new(tickers, dates, vec![1.0, 1.1], vec![f64::INFINITY, 2.1]);
        assert!(result.is_err());
    }
}
