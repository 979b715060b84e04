//! Core data types for the pairs backtester.

mod period;
mod position;
mod price;
mod signal;

pub use period::SharpePeriod;
pub use position::{EntryPoint, Position, SpreadDirection, Trade, TradeKind};
pub use price::{AlignedPrices, PricePoint, PriceSeries};
pub use signal::ZScoreSeries;
