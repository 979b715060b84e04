//! Backtest request and validation.

use chrono::NaiveDate;
use pairs_core::{PairsError, PairsResult};
use serde::{Deserialize, Serialize};

/// A pairs backtest request, as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRequest {
    /// Exactly two tickers, leg 1 first
    pub tickers: Vec<String>,
    /// First date (YYYY-MM-DD, inclusive)
    pub start_date: String,
    /// Last date (YYYY-MM-DD, exclusive)
    pub end_date: String,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub tickers: [String; 2],
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Dates as given, echoed in the result
    pub start_date: String,
    pub end_date: String,
}

impl BacktestRequest {
    pub fn new(
        ticker1: impl Into<String>,
        ticker2: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            tickers: vec![ticker1.into(), ticker2.into()],
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Check ticker count and date range.
    pub fn validate(&self) -> PairsResult<ValidatedRequest> {
        let tickers: [String; 2] = match self.tickers.as_slice() {
            [a, b] => [a.trim().to_string(), b.trim().to_string()],
            other => {
                return Err(PairsError::invalid(format!(
                    "exactly 2 tickers required, got {}",
                    other.len()
                )))
            }
        };
        if tickers.iter().any(|t| t.is_empty()) {
            return Err(PairsError::invalid("tickers must not be empty"));
        }
        if tickers[0].eq_ignore_ascii_case(&tickers[1]) {
            return Err(PairsError::invalid(format!(
                "tickers must differ, got {} twice",
                tickers[0]
            )));
        }

        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if start >= end {
            return Err(PairsError::invalid(format!(
                "start_date ({}) must be before end_date ({})",
                start, end
            )));
        }

        Ok(ValidatedRequest {
            tickers,
            start,
            end,
            start_date: self.start_date.trim().to_string(),
            end_date: self.end_date.trim().to_string(),
        })
    }
}

fn parse_date(field: &str, value: &str) -> PairsResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        PairsError::invalid(format!("{} '{}' is not YYYY-MM-DD: {}", field, value, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = BacktestRequest::new("AAPL", "AMZN", "2022-01-01", "2023-12-31");
        let validated = request.validate().unwrap();

        assert_eq!(validated.tickers, ["AAPL".to_string(), "AMZN".to_string()]);
        assert_eq!(validated.start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(validated.end_date, "2023-12-31");
    }

    #[test]
    fn test_ticker_count() {
        let mut request = BacktestRequest::new("AAPL", "AMZN", "2022-01-01", "2023-12-31");
        request.tickers.push("MSFT".to_string());
        assert!(matches!(request.validate(), Err(PairsError::InvalidParameters(_))));

        request.tickers.truncate(1);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_duplicate_tickers() {
        let request = BacktestRequest::new("AAPL", "aapl", "2022-01-01", "2023-12-31");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bad_dates() {
        let request = BacktestRequest::new("AAPL", "AMZN", "2023-12-31", "2022-01-01");
        assert!(request.validate().is_err());

        let request = BacktestRequest::new("AAPL", "AMZN", "01/01/2022", "2023-12-31");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"tickers": ["AAPL", "AMZN"], "start_date": "2022-01-01", "end_date": "2023-12-31"}"#;
        let request: BacktestRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
    }
}
