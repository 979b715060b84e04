//! Pairs trading backtest engine.

mod engine;
mod portfolio;
mod report;
mod request;
mod statistics;

pub use engine::{BacktestConfig, BacktestEngine};
pub use portfolio::{EquityPoint, LegSizing, PortfolioAccountant, RoundTrip};
pub use report::{BacktestReport, BacktestResult};
pub use request::{BacktestRequest, ValidatedRequest};
pub use statistics::{max_drawdown_pct, period_returns, sharpe_ratio, PerformanceStats};
