//! Backtest command implementation.

use anyhow::{Context, Result};
use pairs_backtest::{BacktestConfig, BacktestEngine, BacktestReport, BacktestRequest};
use pairs_config::AppConfig;
use pairs_core::{PairsError, PairsResult};
use pairs_data::CsvPriceProvider;
use rust_decimal::Decimal;
use tracing::{error, info};

use crate::cli::{BacktestArgs, OutputFormat};

pub async fn run(args: BacktestArgs, config: AppConfig) -> Result<()> {
    let backtest_config = merge_overrides(&args, &config)?;
    let data_dir = args.data.clone().unwrap_or_else(|| config.data.dir.clone());

    let request = BacktestRequest {
        tickers: args.tickers.clone(),
        start_date: args.start.clone(),
        end_date: args.end.clone(),
    };
    info!(
        "Starting pairs backtest {} from {}",
        request.tickers.join(" / "),
        data_dir.display()
    );

    let outcome = execute(backtest_config, &request, data_dir).await;
    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            error!(kind = %e.kind(), "Backtest failed: {}", e);
            if args.output != OutputFormat::Text {
                println!("{}", serde_json::to_string_pretty(&e.to_payload())?);
            }
            return Err(e.into());
        }
    };

    let rendered = match args.output {
        OutputFormat::Json => report.result.to_json()?,
        OutputFormat::Report => report.to_json()?,
        OutputFormat::Text => report.summary(),
    };
    println!("{}", rendered);

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, &rendered)
            .with_context(|| format!("Failed to write {:?}", save_path))?;
        info!("Results saved to {:?}", save_path);
    }
    if let Some(csv_path) = &args.equity_csv {
        std::fs::write(csv_path, report.equity_to_csv())
            .with_context(|| format!("Failed to write {:?}", csv_path))?;
        info!("Equity curve saved to {:?}", csv_path);
    }

    Ok(())
}

async fn execute(
    config: BacktestConfig,
    request: &BacktestRequest,
    data_dir: std::path::PathBuf,
) -> PairsResult<BacktestReport> {
    // Request errors take precedence over a missing data directory
    request.validate()?;
    let provider = CsvPriceProvider::new(data_dir)?;
    BacktestEngine::new(config).run(&provider, request).await
}

/// Apply command-line overrides on top of the loaded configuration.
fn merge_overrides(args: &BacktestArgs, config: &AppConfig) -> Result<BacktestConfig> {
    let mut backtest = config
        .backtest_config()
        .context("Invalid backtest configuration")?;

    if let Some(lookback) = args.lookback {
        backtest.params.lookback = lookback;
    }
    if let Some(entry) = args.entry {
        backtest.params.entry_threshold = entry;
    }
    if let Some(exit) = args.exit {
        backtest.params.exit_threshold = exit;
    }
    if let Some(capital) = args.capital {
        backtest.initial_cash = to_decimal("capital", capital)?;
    }
    if let Some(commission) = args.commission {
        backtest.commission_rate = to_decimal("commission", commission)?;
    }
    if let Some(period) = args.sharpe_period {
        backtest.sharpe_period = period;
    }

    Ok(backtest)
}

fn to_decimal(flag: &str, value: f64) -> Result<Decimal> {
    Decimal::try_from(value)
        .map_err(|_| PairsError::invalid(format!("--{} {} is not a valid amount", flag, value)))
        .context("Invalid command-line value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_core::ErrorKind;

    #[tokio::test]
    async fn test_wrong_ticker_count_is_invalid_parameters() {
        let request = BacktestRequest {
            tickers: vec!["AAPL".to_string(), "AMZN".to_string(), "MSFT".to_string()],
            start_date: "2022-01-01".to_string(),
            end_date: "2023-12-31".to_string(),
        };

        let err = execute(BacktestConfig::default(), &request, "does/not/exist".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);

        let payload = serde_json::to_value(err.to_payload()).unwrap();
        assert_eq!(payload["kind"], "invalid_parameters");
    }

    #[tokio::test]
    async fn test_missing_data_dir_is_data_unavailable() {
        let request = BacktestRequest::new("AAPL", "AMZN", "2022-01-01", "2023-12-31");

        let err = execute(BacktestConfig::default(), &request, "does/not/exist".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
    }
}
