//! Configuration structures.

use pairs_backtest::{BacktestConfig, LegSizing};
use pairs_core::{PairsError, PairsResult, SharpePeriod};
use pairs_monitor::LogFormat;
use pairs_strategy::PairsParams;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub strategy: StrategySettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

impl AppConfig {
    /// Build the engine configuration, validating every field.
    pub fn backtest_config(&self) -> PairsResult<BacktestConfig> {
        let quantity = self.backtest.quantity;
        let sizing = match self.backtest.sizing.as_str() {
            "fixed" => LegSizing::Fixed { quantity },
            "hedge_ratio" => LegSizing::HedgeRatio { quantity },
            other => {
                return Err(PairsError::invalid(format!(
                    "unknown sizing '{}', expected fixed or hedge_ratio",
                    other
                )))
            }
        };

        let config = BacktestConfig {
            initial_cash: self.backtest.initial_cash,
            commission_rate: self.backtest.commission_rate,
            sizing,
            sharpe_period: self.backtest.sharpe_period,
            risk_free_rate: self.backtest.risk_free_rate,
            params: PairsParams {
                lookback: self.strategy.lookback,
                entry_threshold: self.strategy.entry_threshold,
                exit_threshold: self.strategy.exit_threshold,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "pairs-backtester".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Price data location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory of `<TICKER>.csv` files
    pub dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

/// Signal parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySettings {
    pub lookback: usize,
    pub entry_threshold: f64,
    pub exit_threshold: f64,
}

impl Default for StrategySettings {
    fn default() -> Self {
        let params = PairsParams::default();
        Self {
            lookback: params.lookback,
            entry_threshold: params.entry_threshold,
            exit_threshold: params.exit_threshold,
        }
    }
}

/// Backtest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub initial_cash: Decimal,
    pub commission_rate: Decimal,
    /// `fixed` or `hedge_ratio`
    pub sizing: String,
    /// Units of leg 1 per entry
    pub quantity: Decimal,
    pub sharpe_period: SharpePeriod,
    pub risk_free_rate: f64,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            initial_cash: dec!(100000),
            commission_rate: dec!(0.001),
            sizing: "fixed".to_string(),
            quantity: dec!(1),
            sharpe_period: SharpePeriod::Annual,
            risk_free_rate: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backtest_config().unwrap(), BacktestConfig::default());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_hedge_ratio_sizing() {
        let mut config = AppConfig::default();
        config.backtest.sizing = "hedge_ratio".to_string();
        config.backtest.quantity = dec!(10);

        let backtest = config.backtest_config().unwrap();
        assert_eq!(backtest.sizing, LegSizing::HedgeRatio { quantity: dec!(10) });
    }

    #[test]
    fn test_rejects_unknown_sizing_and_bad_cash() {
        let mut config = AppConfig::default();
        config.backtest.sizing = "kelly".to_string();
        assert!(config.backtest_config().is_err());

        let mut config = AppConfig::default();
        config.backtest.initial_cash = Decimal::ZERO;
        assert!(matches!(
            config.backtest_config(),
            Err(PairsError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_toml_rendering() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[strategy]"));
        assert!(rendered.contains("lookback = 20"));
    }
}
