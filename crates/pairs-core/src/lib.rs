//! Core types and traits for the pairs trading backtester.
//!
//! This crate provides the foundational building blocks including:
//! - Price data types (PriceSeries, AlignedPrices)
//! - Position, trade and z-score types
//! - Error kinds shared by every stage of a backtest
//! - Core traits for indicators and price providers

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, ErrorKind, ErrorPayload, PairsError, PairsResult};
pub use traits::*;
pub use types::*;
