//! Backtesting engine.

use num_traits::ToPrimitive;
use pairs_core::{AlignedPrices, PairsError, PairsResult, PriceProvider, SharpePeriod};
use pairs_indicators::HedgeRatioEstimator;
use pairs_strategy::{PairsParams, PositionStateMachine, SpreadSignalGenerator};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::portfolio::{LegSizing, PortfolioAccountant};
use crate::report::{BacktestReport, BacktestResult};
use crate::request::{BacktestRequest, ValidatedRequest};
use crate::statistics::PerformanceStats;

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Initial cash
    pub initial_cash: Decimal,
    /// Commission per fill as a fraction of notional
    pub commission_rate: Decimal,
    /// Units traded per leg
    pub sizing: LegSizing,
    /// Resampling period for the Sharpe ratio
    pub sharpe_period: SharpePeriod,
    /// Yearly risk-free rate subtracted in the Sharpe ratio
    pub risk_free_rate: f64,
    /// Signal parameters
    pub params: PairsParams,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_cash: dec!(100000),
            commission_rate: dec!(0.001),
            sizing: LegSizing::default(),
            sharpe_period: SharpePeriod::Annual,
            risk_free_rate: 0.0,
            params: PairsParams::default(),
        }
    }
}

impl BacktestConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> PairsResult<()> {
        self.params.validate()?;
        if self.initial_cash <= Decimal::ZERO {
            return Err(PairsError::invalid(format!(
                "initial cash must be positive, got {}",
                self.initial_cash
            )));
        }
        if self.commission_rate < Decimal::ZERO || self.commission_rate >= Decimal::ONE {
            return Err(PairsError::invalid(format!(
                "commission rate must be in [0, 1), got {}",
                self.commission_rate
            )));
        }
        if self.sizing.quantity() <= Decimal::ZERO {
            return Err(PairsError::invalid("leg quantity must be positive"));
        }
        if !self.risk_free_rate.is_finite() || self.risk_free_rate <= -1.0 {
            return Err(PairsError::invalid(format!(
                "risk-free rate must be finite and above -100%, got {}",
                self.risk_free_rate
            )));
        }
        Ok(())
    }
}

/// Backtesting engine.
///
/// Each run owns its own series, signal and portfolio state, so one engine
/// can serve concurrent runs.
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Validate the request, fetch prices and simulate.
    ///
    /// Configuration and request errors surface before any fetch.
    pub async fn run(
        &self,
        provider: &dyn PriceProvider,
        request: &BacktestRequest,
    ) -> PairsResult<BacktestReport> {
        self.config.validate()?;
        let request = request.validate()?;

        info!(
            "Fetching {} / {} from {} ({} to {})",
            request.tickers[0],
            request.tickers[1],
            provider.name(),
            request.start,
            request.end
        );
        let prices = provider
            .fetch(&request.tickers, request.start, request.end)
            .await?;

        self.simulate(&request, &prices)
    }

    /// Run the simulation over already-aligned prices.
    pub fn simulate(
        &self,
        request: &ValidatedRequest,
        prices: &AlignedPrices,
    ) -> PairsResult<BacktestReport> {
        self.config.validate()?;
        prices.validate()?;
        let params = self.config.params;

        if prices.len() <= params.lookback {
            return Err(PairsError::InsufficientHistory {
                required: params.lookback,
                available: prices.len(),
            });
        }

        let hedge = HedgeRatioEstimator::new().fit(&prices.prices1, &prices.prices2)?;
        warn!(
            hedge_ratio = hedge.hedge_ratio,
            "Hedge ratio is fit on the full window and is in-sample for every simulated day"
        );
        if hedge.hedge_ratio < 0.0 {
            warn!(
                hedge_ratio = hedge.hedge_ratio,
                "Negative hedge ratio: legs still trade in opposite directions"
            );
        }

        let spread = hedge.spread(&prices.prices1, &prices.prices2);
        let zscores = SpreadSignalGenerator::new(&params)?.generate(&spread)?;
        debug!(
            bars = zscores.len(),
            defined = zscores.defined_count(),
            "Z-score series ready"
        );

        let mut machine = PositionStateMachine::new(&params);
        let mut accountant = PortfolioAccountant::new(
            self.config.initial_cash,
            self.config.commission_rate,
            self.config.sizing.clone(),
        );

        for (i, &date) in prices.dates.iter().enumerate() {
            let (p1, p2) = (prices.prices1[i], prices.prices2[i]);
            if let Some(trade) = machine.on_bar(i, date, zscores.get(i)) {
                accountant.apply(&trade, p1, p2, hedge.hedge_ratio)?;
            }
            accountant.mark_to_market(date, p1, p2)?;
        }

        let last = prices.len() - 1;
        let unrealized = accountant.unrealized_pnl(prices.prices1[last], prices.prices2[last])?;
        let stats = PerformanceStats::compute(
            accountant.initial_cash(),
            accountant.equity_curve(),
            accountant.round_trips(),
            accountant.commissions(),
            self.config.sharpe_period,
            self.config.risk_free_rate,
        );
        let trades = machine.trades().to_vec();

        let result = BacktestResult {
            tickers: request.tickers.to_vec(),
            start_date: request.start_date.clone(),
            end_date: request.end_date.clone(),
            initial_portfolio: to_f64(accountant.initial_cash())?,
            final_portfolio: to_f64(accountant.final_equity().round_dp(2))?,
            total_return_pct: round_to(stats.total_return_pct, 2),
            sharpe_ratio: stats.sharpe_ratio.map(|v| round_to(v, 3)),
            max_drawdown_pct: stats.max_drawdown_pct.map(|v| round_to(v, 2)),
            trades: trades.len(),
            open_position: accountant.open_direction(),
            unrealized_pnl: to_f64(unrealized.round_dp(2))?,
        };

        info!(
            "Backtest complete: {} bars, {} trade events, return {:.2}%",
            prices.len(),
            result.trades,
            result.total_return_pct
        );

        Ok(BacktestReport {
            result,
            config: self.config.clone(),
            hedge,
            hedge_ratio_in_sample: true,
            stats,
            trades,
            round_trips: accountant.round_trips().to_vec(),
            equity_curve: accountant.equity_curve().to_vec(),
        })
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn to_f64(value: Decimal) -> PairsResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| PairsError::Internal(format!("cannot represent {} as f64", value)))
}
