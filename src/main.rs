//! Pairs trading backtester CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use pairs_config::load_config;
use pairs_monitor::{setup_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config);

    // CLI flags win over the configured logging section
    let (level, format) = match &config {
        Ok(c) => (c.logging.level.clone(), c.logging.format),
        Err(_) => ("info".to_string(), LogFormat::Pretty),
    };
    let level = cli.log_level.map(|l| l.as_str().to_string()).unwrap_or(level);
    let format = if cli.json_logs { LogFormat::Json } else { format };
    setup_logging(&level, format).context("Failed to install log subscriber")?;

    match cli.command {
        Commands::Backtest(args) => {
            let config = config
                .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
            cli::commands::backtest::run(args, config).await
        }
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, config),
    }
}
