//! Core traits for the pairs backtester.

mod indicator;
mod price_provider;

pub use indicator::Indicator;
pub use price_provider::PriceProvider;
