//! Price provider trait definitions.

use crate::error::DataError;
use crate::types::AlignedPrices;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of daily prices for a ticker pair.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch both tickers and align them onto their common dates.
    ///
    /// # Arguments
    /// * `tickers` - The pair, leg 1 first
    /// * `start` - First date to include
    /// * `end` - First date to exclude
    ///
    /// # Returns
    /// Aligned prices ordered from oldest to newest. Fails if either ticker
    /// cannot be retrieved or no common dates remain.
    async fn fetch(
        &self,
        tickers: &[String; 2],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AlignedPrices, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyProvider;

    #[async_trait]
    impl PriceProvider for EmptyProvider {
        async fn fetch(
            &self,
            _tickers: &[String; 2],
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<AlignedPrices, DataError> {
            Err(DataError::NoDataAvailable)
        }

        fn name(&self) -> &str {
            "empty"
        }
    }

    #[tokio::test]
    async fn test_provider_is_object_safe() {
        let provider: Box<dyn PriceProvider> = Box::new(EmptyProvider);
        let tickers = ["A".to_string(), "B".to_string()];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        assert!(provider.fetch(&tickers, start, end).await.is_err());
        assert_eq!(provider.name(), "empty");
    }
}
