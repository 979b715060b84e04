//! Spread position and trade event types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an open spread position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpreadDirection {
    /// Long asset 1, short asset 2
    LongSpread,
    /// Short asset 1, long asset 2
    ShortSpread,
}

impl fmt::Display for SpreadDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadDirection::LongSpread => write!(f, "LongSpread"),
            SpreadDirection::ShortSpread => write!(f, "ShortSpread"),
        }
    }
}

/// Where an open position was entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Bar index of the entry
    pub index: usize,
    /// Date of the entry
    pub date: NaiveDate,
    /// Z-score that triggered the entry
    pub zscore: f64,
}

/// Current trading state. Exactly one variant is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Flat,
    LongSpread(EntryPoint),
    ShortSpread(EntryPoint),
}

impl Position {
    /// Open a position in the given direction.
    pub fn open(direction: SpreadDirection, entry: EntryPoint) -> Self {
        match direction {
            SpreadDirection::LongSpread => Position::LongSpread(entry),
            SpreadDirection::ShortSpread => Position::ShortSpread(entry),
        }
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }

    /// Direction of the open position, if any.
    pub fn direction(&self) -> Option<SpreadDirection> {
        match self {
            Position::Flat => None,
            Position::LongSpread(_) => Some(SpreadDirection::LongSpread),
            Position::ShortSpread(_) => Some(SpreadDirection::ShortSpread),
        }
    }

    /// Entry details of the open position, if any.
    pub fn entry(&self) -> Option<&EntryPoint> {
        match self {
            Position::Flat => None,
            Position::LongSpread(e) | Position::ShortSpread(e) => Some(e),
        }
    }
}

/// Kind of trade event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Entry,
    Exit,
}

/// Immutable record of an entry or exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub kind: TradeKind,
    /// Direction of the position being opened or closed
    pub direction: SpreadDirection,
    /// Bar index
    pub index: usize,
    pub date: NaiveDate,
    /// Z-score on the event bar
    pub zscore: f64,
}
