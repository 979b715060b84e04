//! Logging setup for the pairs backtester.

mod logging;

pub use logging::{build_filter, setup_logging, LogFormat};
