//! Cash, leg positions and equity accounting.

use chrono::NaiveDate;
use pairs_core::{PairsError, PairsResult, SpreadDirection, Trade, TradeKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How many units each leg trades on entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegSizing {
    /// Same number of units on both legs
    Fixed { quantity: Decimal },
    /// `quantity` units of leg 1 and `quantity * |hedge_ratio|` units of leg 2
    HedgeRatio { quantity: Decimal },
}

impl Default for LegSizing {
    fn default() -> Self {
        LegSizing::Fixed { quantity: dec!(1) }
    }
}

impl LegSizing {
    /// Base quantity of leg 1.
    pub fn quantity(&self) -> Decimal {
        match self {
            LegSizing::Fixed { quantity } | LegSizing::HedgeRatio { quantity } => *quantity,
        }
    }

    /// Unsigned unit counts for (leg 1, leg 2).
    pub fn leg_quantities(&self, hedge_ratio: f64) -> PairsResult<(Decimal, Decimal)> {
        match self {
            LegSizing::Fixed { quantity } => Ok((*quantity, *quantity)),
            LegSizing::HedgeRatio { quantity } => {
                let ratio = to_decimal(hedge_ratio.abs())?.round_dp(8);
                Ok((*quantity, (*quantity * ratio).round_dp(8)))
            }
        }
    }
}

/// Equity at the close of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: Decimal,
}

/// A closed entry/exit pair with its realized P&L, commissions included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub direction: SpreadDirection,
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub pnl: Decimal,
}

/// Legs held while a spread position is open.
#[derive(Debug, Clone)]
struct OpenLegs {
    direction: SpreadDirection,
    entry_index: usize,
    entry_date: NaiveDate,
    /// Cash (= equity) just before the entry fills
    equity_before: Decimal,
}

/// Tracks cash, open leg quantities and the daily equity curve.
#[derive(Debug, Clone)]
pub struct PortfolioAccountant {
    initial_cash: Decimal,
    commission_rate: Decimal,
    sizing: LegSizing,
    cash: Decimal,
    /// Signed units of leg 1 (positive long, negative short)
    leg1_qty: Decimal,
    /// Signed units of leg 2
    leg2_qty: Decimal,
    open: Option<OpenLegs>,
    commissions: Decimal,
    equity_curve: Vec<EquityPoint>,
    round_trips: Vec<RoundTrip>,
}

impl PortfolioAccountant {
    /// Create an accountant holding only cash.
    pub fn new(initial_cash: Decimal, commission_rate: Decimal, sizing: LegSizing) -> Self {
        Self {
            initial_cash,
            commission_rate,
            sizing,
            cash: initial_cash,
            leg1_qty: Decimal::ZERO,
            leg2_qty: Decimal::ZERO,
            open: None,
            commissions: Decimal::ZERO,
            equity_curve: Vec::new(),
            round_trips: Vec::new(),
        }
    }

    /// Execute both legs of an entry or exit at the given prices.
    pub fn apply(
        &mut self,
        trade: &Trade,
        price1: f64,
        price2: f64,
        hedge_ratio: f64,
    ) -> PairsResult<()> {
        let p1 = to_decimal(price1)?;
        let p2 = to_decimal(price2)?;

        match trade.kind {
            TradeKind::Entry => {
                if self.open.is_some() {
                    return Err(PairsError::Internal(format!(
                        "entry on bar {} while a position is already open",
                        trade.index
                    )));
                }
                let (q1, q2) = self.sizing.leg_quantities(hedge_ratio)?;
                let equity_before = self.cash;
                let (d1, d2) = match trade.direction {
                    SpreadDirection::LongSpread => (q1, -q2),
                    SpreadDirection::ShortSpread => (-q1, q2),
                };
                self.fill(d1, p1, d2, p2);
                self.open = Some(OpenLegs {
                    direction: trade.direction,
                    entry_index: trade.index,
                    entry_date: trade.date,
                    equity_before,
                });
                debug!(
                    direction = %trade.direction,
                    leg1 = %self.leg1_qty,
                    leg2 = %self.leg2_qty,
                    cash = %self.cash,
                    "Opened spread"
                );
            }
            TradeKind::Exit => {
                let open = self.open.take().ok_or_else(|| {
                    PairsError::Internal(format!("exit on bar {} while flat", trade.index))
                })?;
                self.fill(-self.leg1_qty, p1, -self.leg2_qty, p2);
                let pnl = self.cash - open.equity_before;
                debug!(direction = %open.direction, pnl = %pnl, cash = %self.cash, "Closed spread");
                self.round_trips.push(RoundTrip {
                    direction: open.direction,
                    entry_index: open.entry_index,
                    exit_index: trade.index,
                    entry_date: open.entry_date,
                    exit_date: trade.date,
                    pnl,
                });
            }
        }
        Ok(())
    }

    /// Fill signed quantity deltas on both legs and charge commission per fill.
    fn fill(&mut self, delta1: Decimal, price1: Decimal, delta2: Decimal, price2: Decimal) {
        for (delta, price) in [(delta1, price1), (delta2, price2)] {
            let notional = delta * price;
            let commission = notional.abs() * self.commission_rate;
            self.cash -= notional + commission;
            self.commissions += commission;
        }
        self.leg1_qty += delta1;
        self.leg2_qty += delta2;
    }

    /// Cash plus legs valued at the given prices.
    pub fn equity_at(&self, price1: f64, price2: f64) -> PairsResult<Decimal> {
        Ok(self.cash + self.leg1_qty * to_decimal(price1)? + self.leg2_qty * to_decimal(price2)?)
    }

    /// Record end-of-bar equity and return it.
    pub fn mark_to_market(&mut self, date: NaiveDate, price1: f64, price2: f64) -> PairsResult<Decimal> {
        let equity = self.equity_at(price1, price2)?;
        self.equity_curve.push(EquityPoint { date, equity });
        Ok(equity)
    }

    /// P&L of the open position at the given prices, entry commission included.
    pub fn unrealized_pnl(&self, price1: f64, price2: f64) -> PairsResult<Decimal> {
        match &self.open {
            Some(open) => Ok(self.equity_at(price1, price2)? - open.equity_before),
            None => Ok(Decimal::ZERO),
        }
    }

    pub fn initial_cash(&self) -> Decimal {
        self.initial_cash
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    /// Signed units held on (leg 1, leg 2).
    pub fn leg_quantities(&self) -> (Decimal, Decimal) {
        (self.leg1_qty, self.leg2_qty)
    }

    /// Direction of the open position, if any.
    pub fn open_direction(&self) -> Option<SpreadDirection> {
        self.open.as_ref().map(|o| o.direction)
    }

    pub fn commissions(&self) -> Decimal {
        self.commissions
    }

    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }

    pub fn round_trips(&self) -> &[RoundTrip] {
        &self.round_trips
    }

    /// Last recorded equity, or the initial cash before any bar.
    pub fn final_equity(&self) -> Decimal {
        self.equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.initial_cash)
    }
}

/// Convert a price or ratio into a Decimal.
pub(crate) fn to_decimal(value: f64) -> PairsResult<Decimal> {
    Decimal::try_from(value)
        .map_err(|e| PairsError::Internal(format!("cannot represent {} as decimal: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn trade(kind: TradeKind, direction: SpreadDirection, index: usize) -> Trade {
        Trade {
            kind,
            direction,
            index,
            date: day(index as u32 + 1),
            zscore: 0.0,
        }
    }

    #[test]
    fn test_short_spread_round_trip_with_commission() {
        let mut acct = PortfolioAccountant::new(dec!(1000), dec!(0.001), LegSizing::default());

        // Sell 1 @ 100, buy 1 @ 50
        acct.apply(&trade(TradeKind::Entry, SpreadDirection::ShortSpread, 0), 100.0, 50.0, 1.0)
            .unwrap();
        assert_eq!(acct.leg_quantities(), (dec!(-1), dec!(1)));
        assert_eq!(acct.cash(), dec!(1000) + dec!(100) - dec!(50) - dec!(0.15));

        // Spread converges: leg 1 falls, leg 2 rises
        let equity = acct.mark_to_market(day(1), 90.0, 55.0).unwrap();
        assert_eq!(equity, dec!(1050) - dec!(0.15) - dec!(90) + dec!(55));

        acct.apply(&trade(TradeKind::Exit, SpreadDirection::ShortSpread, 1), 90.0, 55.0, 1.0)
            .unwrap();
        assert_eq!(acct.leg_quantities(), (Decimal::ZERO, Decimal::ZERO));

        let trips = acct.round_trips();
        assert_eq!(trips.len(), 1);
        // Gross +15, commissions 0.15 + 0.145
        assert_eq!(trips[0].pnl, dec!(15) - dec!(0.15) - dec!(0.145));
        assert_eq!(acct.commissions(), dec!(0.295));
        assert!(acct.open_direction().is_none());
    }

    #[test]
    fn test_long_spread_is_mirror() {
        let mut acct = PortfolioAccountant::new(dec!(1000), Decimal::ZERO, LegSizing::default());
        acct.apply(&trade(TradeKind::Entry, SpreadDirection::LongSpread, 0), 100.0, 50.0, 1.0)
            .unwrap();
        assert_eq!(acct.leg_quantities(), (dec!(1), dec!(-1)));
        assert_eq!(acct.unrealized_pnl(110.0, 50.0).unwrap(), dec!(10));
    }

    #[test]
    fn test_hedge_ratio_sizing() {
        let sizing = LegSizing::HedgeRatio { quantity: dec!(10) };
        let (q1, q2) = sizing.leg_quantities(-1.5).unwrap();
        assert_eq!(q1, dec!(10));
        assert_eq!(q2, dec!(15));
    }

    #[test]
    fn test_out_of_order_events_rejected() {
        let mut acct = PortfolioAccountant::new(dec!(1000), Decimal::ZERO, LegSizing::default());
        let exit = trade(TradeKind::Exit, SpreadDirection::LongSpread, 0);
        assert!(matches!(
            acct.apply(&exit, 1.0, 1.0, 1.0),
            Err(PairsError::Internal(_))
        ));

        let entry = trade(TradeKind::Entry, SpreadDirection::LongSpread, 1);
        acct.apply(&entry, 1.0, 1.0, 1.0).unwrap();
        assert!(acct.apply(&entry, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_non_finite_price() {
        let acct = PortfolioAccountant::new(dec!(1000), Decimal::ZERO, LegSizing::default());
        assert!(acct.equity_at(f64::NAN, 1.0).is_err());
    }
}
