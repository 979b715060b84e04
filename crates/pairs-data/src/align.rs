//! Inner-join alignment of two price series.

use pairs_core::{AlignedPrices, DataError, PriceSeries};
use tracing::debug;

/// Join two series on their common dates.
///
/// Points with a non-finite price are dropped before joining, so a date
/// survives only if both series carry a usable price for it.
pub fn align(series1: &PriceSeries, series2: &PriceSeries) -> Result<AlignedPrices, DataError> {
    for series in [series1, series2] {
        if !series.iter().any(|p| p.is_valid()) {
            return Err(DataError::SymbolNotFound(format!(
                "{} has no prices in the requested range",
                series.ticker
            )));
        }
    }

    let left: Vec<_> = series1.iter().filter(|p| p.is_valid()).collect();
    let right: Vec<_> = series2.iter().filter(|p| p.is_valid()).collect();

    let mut dates = Vec::with_capacity(left.len().min(right.len()));
    let mut prices1 = Vec::with_capacity(dates.capacity());
    let mut prices2 = Vec::with_capacity(dates.capacity());

    // Both sides are date-ordered
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].date.cmp(&right[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dates.push(left[i].date);
                prices1.push(left[i].price);
                prices2.push(right[j].price);
                i += 1;
                j += 1;
            }
        }
    }

    if dates.is_empty() {
        return Err(DataError::Misaligned(format!(
            "{} and {} share no trading dates",
            series1.ticker, series2.ticker
        )));
    }

    debug!(
        left = series1.len(),
        right = series2.len(),
        aligned = dates.len(),
        "Aligned price series"
    );

    AlignedPrices::new(
        [series1.ticker.clone(), series2.ticker.clone()],
        dates,
        prices1,
        prices2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pairs_core::PricePoint;

    fn series(ticker: &str, points: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::new(
            ticker,
            points
                .iter()
                .map(|&(day, price)| {
                    PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), price)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_inner_join() {
        let a = series("A", &[(2, 10.0), (3, 11.0), (4, 12.0), (5, 13.0)]);
        let b = series("B", &[(3, 20.0), (4, f64::NAN), (5, 22.0), (8, 23.0)]);

        let aligned = align(&a, &b).unwrap();
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned.prices1, vec![11.0, 13.0]);
        assert_eq!(aligned.prices2, vec![20.0, 22.0]);
        assert_eq!(aligned.tickers, ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_disjoint_dates() {
        let a = series("A", &[(2, 10.0), (3, 11.0)]);
        let b = series("B", &[(4, 20.0), (5, 21.0)]);
        assert!(matches!(align(&a, &b), Err(DataError::Misaligned(_))));
    }

    #[test]
    fn test_empty_column() {
        let a = series("A", &[(2, 10.0)]);
        let b = series("B", &[]);
        assert!(matches!(align(&a, &b), Err(DataError::SymbolNotFound(_))));
    }
}
