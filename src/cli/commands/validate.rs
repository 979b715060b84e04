//! Validate configuration command.

use anyhow::Result;
use pairs_config::{AppConfig, SettingsError};
use std::path::Path;

pub fn run(config_path: &Path, loaded: Result<AppConfig, SettingsError>) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, using defaults and environment overrides");
    }

    match loaded {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {} ({})", config.logging.level, config.logging.format);
            println!("Data dir: {}", config.data.dir.display());
            println!("Lookback: {}", config.strategy.lookback);
            println!("Entry threshold: {}", config.strategy.entry_threshold);
            println!("Exit threshold: {}", config.strategy.exit_threshold);
            println!("Initial cash: {}", config.backtest.initial_cash);
            println!("Commission rate: {}", config.backtest.commission_rate);
            println!("Sizing: {} x {}", config.backtest.sizing, config.backtest.quantity);
            println!("Sharpe period: {}", config.backtest.sharpe_period);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
