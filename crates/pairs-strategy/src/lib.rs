//! Pairs trading signal generation and position management.
//!
//! - [`PairsParams`]: lookback and z-score thresholds
//! - [`SpreadSignalGenerator`]: rolling z-score of the hedged spread
//! - [`PositionStateMachine`]: Flat / LongSpread / ShortSpread transitions

mod params;
mod signal;
mod state_machine;

pub use params::PairsParams;
pub use signal::SpreadSignalGenerator;
pub use state_machine::PositionStateMachine;
