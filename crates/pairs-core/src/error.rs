//! Error types for the pairs backtester.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Top-level backtest error.
///
/// Every stage fails fast with one of these; nothing is retried or
/// substituted internally.
#[derive(Error, Debug)]
pub enum PairsError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] DataError),

    #[error("Insufficient history: need more than {required} aligned bars, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Regression failure: {0}")]
    RegressionFailure(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PairsError {
    /// Shorthand for an `InvalidParameters` error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Shorthand for a `RegressionFailure` error.
    pub fn regression(msg: impl Into<String>) -> Self {
        Self::RegressionFailure(msg.into())
    }

    /// Stable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DataUnavailable(_) => ErrorKind::DataUnavailable,
            Self::InsufficientHistory { .. } => ErrorKind::InsufficientHistory,
            Self::RegressionFailure(_) => ErrorKind::RegressionFailure,
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Structured form used by the request surface.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.to_string(),
            kind: self.kind(),
        }
    }
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Series could not be aligned: {0}")]
    Misaligned(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classification tag for [`PairsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DataUnavailable,
    InsufficientHistory,
    RegressionFailure,
    InvalidParameters,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::DataUnavailable => "data_unavailable",
            ErrorKind::InsufficientHistory => "insufficient_history",
            ErrorKind::RegressionFailure => "regression_failure",
            ErrorKind::InvalidParameters => "invalid_parameters",
            ErrorKind::Internal => "internal",
        };
        write!(f, "{}", s)
    }
}

/// Error payload returned in place of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human-readable message
    pub error: String,
    /// Error classification
    pub kind: ErrorKind,
}

/// Result type alias for backtest operations.
pub type PairsResult<T> = Result<T, PairsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_converts_to_data_unavailable() {
        let err: PairsError = DataError::SymbolNotFound("AAPL".into()).into();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
        assert!(err.to_string().contains("AAPL"));
    }

    #[test]
    fn test_payload_serialization() {
        let err = PairsError::InsufficientHistory {
            required: 20,
            available: 5,
        };
        let json = serde_json::to_value(err.to_payload()).unwrap();
        assert_eq!(json["kind"], "insufficient_history");
        assert!(json["error"].as_str().unwrap().contains("20"));
    }
}
