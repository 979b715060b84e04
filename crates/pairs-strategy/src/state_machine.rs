//! Three-state position machine driven by the spread z-score.

use chrono::NaiveDate;
use pairs_core::{EntryPoint, Position, SpreadDirection, Trade, TradeKind, ZScoreSeries};
use tracing::debug;

use crate::PairsParams;

/// Converts z-scores into entry and exit events.
///
/// | state        | condition     | next        | event |
/// |--------------|---------------|-------------|-------|
/// | Flat         | z > entry     | ShortSpread | entry |
/// | Flat         | z < -entry    | LongSpread  | entry |
/// | Long/Short   | \|z\| < exit  | Flat        | exit  |
///
/// Anything else, including an undefined z-score, leaves the state as is.
#[derive(Debug, Clone)]
pub struct PositionStateMachine {
    entry_threshold: f64,
    exit_threshold: f64,
    position: Position,
    trades: Vec<Trade>,
}

impl PositionStateMachine {
    /// Create a machine in the `Flat` state.
    pub fn new(params: &PairsParams) -> Self {
        Self {
            entry_threshold: params.entry_threshold,
            exit_threshold: params.exit_threshold,
            position: Position::Flat,
            trades: Vec::new(),
        }
    }

    /// Process the z-score of one bar. Must be called in bar order.
    pub fn on_bar(&mut self, index: usize, date: NaiveDate, zscore: Option<f64>) -> Option<Trade> {
        let z = zscore?;

        let trade = match self.position {
            Position::Flat => {
                let direction = if z > self.entry_threshold {
                    SpreadDirection::ShortSpread
                } else if z < -self.entry_threshold {
                    SpreadDirection::LongSpread
                } else {
                    return None;
                };
                self.position = Position::open(direction, EntryPoint { index, date, zscore: z });
                Trade {
                    kind: TradeKind::Entry,
                    direction,
                    index,
                    date,
                    zscore: z,
                }
            }
            Position::LongSpread(_) | Position::ShortSpread(_) => {
                if z.abs() >= self.exit_threshold {
                    return None;
                }
                let direction = self.position.direction()?;
                if let Some(entry) = self.position.entry() {
                    debug!(
                        entry_index = entry.index,
                        entry_zscore = entry.zscore,
                        held = index - entry.index,
                        "Closing spread"
                    );
                }
                self.position = Position::Flat;
                Trade {
                    kind: TradeKind::Exit,
                    direction,
                    index,
                    date,
                    zscore: z,
                }
            }
        };

        debug!(
            kind = ?trade.kind,
            direction = %trade.direction,
            index,
            %date,
            zscore = z,
            "Position transition"
        );
        self.trades.push(trade);
        Some(trade)
    }

    /// Drive the machine over a whole series, returning the emitted events.
    pub fn run(&mut self, dates: &[NaiveDate], zscores: &ZScoreSeries) -> Vec<Trade> {
        dates
            .iter()
            .enumerate()
            .filter_map(|(i, &date)| self.on_bar(i, date, zscores.get(i)))
            .collect()
    }

    /// Current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// All events emitted so far.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }
}
