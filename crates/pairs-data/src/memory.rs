//! In-memory price provider.

use async_trait::async_trait;
use chrono::NaiveDate;
use pairs_core::{AlignedPrices, DataError, PriceProvider, PriceSeries};
use std::collections::HashMap;

use crate::align;

/// Serves pre-built series keyed by ticker.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series, replacing any previous one for the same ticker.
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.ticker.clone(), series);
    }

    fn get(&self, ticker: &str) -> Result<&PriceSeries, DataError> {
        self.series
            .get(ticker)
            .ok_or_else(|| DataError::SymbolNotFound(ticker.to_string()))
    }
}

#[async_trait]
impl PriceProvider for InMemoryPriceProvider {
    async fn fetch(
        &self,
        tickers: &[String; 2],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AlignedPrices, DataError> {
        let series1 = self.get(&tickers[0])?.between(start, end);
        let series2 = self.get(&tickers[1])?.between(start, end);
        align(&series1, &series2)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_core::PricePoint;

    #[tokio::test]
    async fn test_fetch_known_and_unknown() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let a = PriceSeries::new("A", vec![PricePoint::new(day(1), 1.0), PricePoint::new(day(4), 2.0)]).unwrap();
        let b = PriceSeries::new("B", vec![PricePoint::new(day(1), 3.0), PricePoint::new(day(4), 4.0)]).unwrap();
        let provider = InMemoryPriceProvider::new().with_series(a).with_series(b);

        let tickers = ["A".to_string(), "B".to_string()];
        let aligned = provider.fetch(&tickers, day(1), day(31)).await.unwrap();
        assert_eq!(aligned.len(), 2);

        let unknown = ["A".to_string(), "C".to_string()];
        assert!(provider.fetch(&unknown, day(1), day(31)).await.is_err());
    }
}
