//! Backtest performance statistics.

use chrono::NaiveDate;
use num_traits::ToPrimitive;
use pairs_core::SharpePeriod;
use pairs_indicators::{mean, std_dev};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::{EquityPoint, RoundTrip};

/// Standard deviations at or below this are treated as zero variance.
const MIN_STD_DEV: f64 = 1e-12;

/// Summary statistics of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Initial capital
    pub initial_equity: f64,
    /// Final marked-to-market equity
    pub final_equity: f64,
    /// Total return percentage
    pub total_return_pct: f64,
    /// Annualized Sharpe ratio, if computable
    pub sharpe_ratio: Option<f64>,
    /// Period used for the Sharpe ratio
    pub sharpe_period: SharpePeriod,
    /// Number of resampled periods
    pub periods: usize,
    /// Maximum drawdown percentage, if computable
    pub max_drawdown_pct: Option<f64>,
    /// Number of closed round trips
    pub round_trips: usize,
    /// Round trips with positive P&L
    pub winning_trades: usize,
    /// Round trips with negative P&L
    pub losing_trades: usize,
    /// Win rate percentage over closed round trips
    pub win_rate_pct: Option<f64>,
    /// Total commission paid
    pub commissions: f64,
    /// Number of bars processed
    pub bars_processed: usize,
}

impl PerformanceStats {
    /// Compute statistics from an equity curve and closed round trips.
    pub fn compute(
        initial: Decimal,
        curve: &[EquityPoint],
        round_trips: &[RoundTrip],
        commissions: Decimal,
        sharpe_period: SharpePeriod,
        risk_free_rate: f64,
    ) -> Self {
        let initial_equity = initial.to_f64().unwrap_or(0.0);
        let final_equity = curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial)
            .to_f64()
            .unwrap_or(0.0);

        let total_return_pct = if initial_equity > 0.0 {
            (final_equity / initial_equity - 1.0) * 100.0
        } else {
            0.0
        };

        let dated: Vec<(NaiveDate, f64)> = curve
            .iter()
            .map(|p| (p.date, p.equity.to_f64().unwrap_or(0.0)))
            .collect();
        let returns = period_returns(initial_equity, &dated, sharpe_period);
        let sharpe = sharpe_ratio(&returns, sharpe_period.periods_per_year(), risk_free_rate);

        let equity: Vec<f64> = dated.iter().map(|(_, e)| *e).collect();
        let max_drawdown = max_drawdown_pct(initial_equity, &equity);

        let winning_trades = round_trips.iter().filter(|t| t.pnl > Decimal::ZERO).count();
        let losing_trades = round_trips.iter().filter(|t| t.pnl < Decimal::ZERO).count();
        let win_rate_pct = if round_trips.is_empty() {
            None
        } else {
            Some(winning_trades as f64 / round_trips.len() as f64 * 100.0)
        };

        Self {
            initial_equity,
            final_equity,
            total_return_pct,
            sharpe_ratio: sharpe,
            sharpe_period,
            periods: returns.len(),
            max_drawdown_pct: max_drawdown,
            round_trips: round_trips.len(),
            winning_trades,
            losing_trades,
            win_rate_pct,
            commissions: commissions.to_f64().unwrap_or(0.0),
            bars_processed: curve.len(),
        }
    }
}

/// Largest peak-to-trough decline in percent.
///
/// The running peak starts at `initial` and never decreases. Equity below
/// zero counts as a 100% drawdown. Returns `None` if `initial` is not
/// positive.
pub fn max_drawdown_pct(initial: f64, equity: &[f64]) -> Option<f64> {
    if initial.is_nan() || initial <= 0.0 {
        return None;
    }

    let mut peak = initial;
    let mut max_dd: f64 = 0.0;
    for &value in equity {
        if value > peak {
            peak = value;
        }
        let dd = ((peak - value) / peak * 100.0).clamp(0.0, 100.0);
        max_dd = max_dd.max(dd);
    }
    Some(max_dd)
}

/// Returns between the closing equity of consecutive periods.
///
/// The first period is measured against `initial`. Periods whose starting
/// equity is not positive are skipped.
pub fn period_returns(initial: f64, curve: &[(NaiveDate, f64)], period: SharpePeriod) -> Vec<f64> {
    let mut closes: Vec<f64> = Vec::new();
    let mut current_bucket = None;

    for &(date, equity) in curve {
        let bucket = period.bucket(date);
        if current_bucket == Some(bucket) {
            if let Some(last) = closes.last_mut() {
                *last = equity;
            }
        } else {
            closes.push(equity);
            current_bucket = Some(bucket);
        }
    }

    let mut returns = Vec::with_capacity(closes.len());
    let mut prev = initial;
    for close in closes {
        if prev > 0.0 {
            returns.push(close / prev - 1.0);
        }
        prev = close;
    }
    returns
}

/// Annualized Sharpe ratio of per-period returns.
///
/// `risk_free_rate` is a yearly rate, converted to a per-period rate and
/// subtracted from every return. Uses the population standard deviation.
/// Returns `None` with fewer than two periods or zero variance.
pub fn sharpe_ratio(returns: &[f64], periods_per_year: f64, risk_free_rate: f64) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }

    let rf_per_period = (1.0 + risk_free_rate).powf(1.0 / periods_per_year) - 1.0;
    let excess: Vec<f64> = returns.iter().map(|r| r - rf_per_period).collect();

    let avg = mean(&excess)?;
    let sd = std_dev(&excess, 0)?;
    if !sd.is_finite() || sd <= MIN_STD_DEV {
        return None;
    }

    let sharpe = avg / sd * periods_per_year.sqrt();
    sharpe.is_finite().then_some(sharpe)
}
