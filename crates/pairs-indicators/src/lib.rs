//! Rolling statistics and hedge-ratio regression.
//!
//! This crate provides the numeric building blocks of the spread signal:
//! - Simple moving average over a trailing window
//! - Rolling sample standard deviation
//! - Ordinary least squares fit of one price series on another

pub mod moving_average;
pub mod regression;
pub mod volatility;

pub use moving_average::Sma;
pub use regression::{HedgeFit, HedgeRatioEstimator};
pub use volatility::{mean, std_dev, StdDev};
