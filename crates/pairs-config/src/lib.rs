//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, DataSettings, LoggingConfig, StrategySettings};

use config::{Config, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Prefix of environment overrides, e.g. `PAIRS__STRATEGY__LOOKBACK=30`.
pub const ENV_PREFIX: &str = "PAIRS";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] pairs_core::PairsError),
}

/// Load configuration from an optional file and the environment.
///
/// A missing file falls back to defaults. Environment variables override
/// file values.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.backtest_config()?;
    Ok(app)
}

/// Parse configuration from a TOML string, without environment overrides.
pub fn parse_config(source: &str) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from_str(source, config::FileFormat::Toml))
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.backtest_config()?;
    Ok(app)
}
