//! Backtest result payload and report generation.

use pairs_core::{SpreadDirection, Trade};
use pairs_indicators::HedgeFit;
use serde::{Deserialize, Serialize};

use crate::portfolio::{EquityPoint, RoundTrip};
use crate::statistics::PerformanceStats;
use crate::BacktestConfig;

/// Summary payload of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub tickers: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub initial_portfolio: f64,
    /// Marked-to-market value, open legs included
    pub final_portfolio: f64,
    pub total_return_pct: f64,
    #[serde(with = "not_available")]
    pub sharpe_ratio: Option<f64>,
    #[serde(with = "not_available")]
    pub max_drawdown_pct: Option<f64>,
    /// Entry and exit events; odd when the run ends with a position open
    pub trades: usize,
    /// Position still open at the last bar, if any
    pub open_position: Option<SpreadDirection>,
    /// P&L of the open position, included in `final_portfolio`
    pub unrealized_pnl: f64,
}

impl BacktestResult {
    /// Whether the run finished without an open position.
    pub fn ends_flat(&self) -> bool {
        self.open_position.is_none()
    }

    /// Pretty JSON of the payload.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Serializes `None` as the string "N/A".
mod not_available {
    use serde::{de, Deserialize, Deserializer, Serializer};

    const NA: &str = "N/A";

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_str(NA),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(v) => Ok(Some(v)),
            NumberOrText::Text(s) if s == NA => Ok(None),
            NumberOrText::Text(s) => Err(de::Error::custom(format!("expected number or \"N/A\", got \"{}\"", s))),
        }
    }
}

/// Complete backtest report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Summary payload
    pub result: BacktestResult,
    /// Configuration used
    pub config: BacktestConfig,
    /// Hedge-ratio fit
    pub hedge: HedgeFit,
    /// The ratio was fit on the whole window, bars after each trade included
    pub hedge_ratio_in_sample: bool,
    /// Statistics
    pub stats: PerformanceStats,
    /// Entry and exit events in order
    pub trades: Vec<Trade>,
    /// Closed round trips
    pub round_trips: Vec<RoundTrip>,
    /// Equity curve
    pub equity_curve: Vec<EquityPoint>,
}

fn fmt_optional(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.*}{}", decimals, v, suffix),
        None => "N/A".to_string(),
    }
}

impl BacktestReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let r = &self.result;
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                  PAIRS BACKTEST REPORT                     \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("PAIR\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Tickers:             {} / {}\n", r.tickers[0], r.tickers[1]));
        s.push_str(&format!("  Period:              {} to {}\n", r.start_date, r.end_date));
        s.push_str(&format!(
            "  Hedge Ratio:         {:.4}{}\n",
            self.hedge.hedge_ratio,
            if self.hedge_ratio_in_sample { " (in-sample)" } else { "" }
        ));
        s.push_str(&format!("  R-Squared:           {:.4}\n", self.hedge.r_squared));
        s.push('\n');

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Initial Portfolio:   ${:.2}\n", r.initial_portfolio));
        s.push_str(&format!("  Final Portfolio:     ${:.2}\n", r.final_portfolio));
        s.push_str(&format!("  Total Return:        {:.2}%\n", r.total_return_pct));
        s.push_str(&format!(
            "  Sharpe Ratio:        {} ({})\n",
            fmt_optional(r.sharpe_ratio, 3, ""),
            self.stats.sharpe_period
        ));
        s.push_str(&format!(
            "  Max Drawdown:        {}\n",
            fmt_optional(r.max_drawdown_pct, 2, "%")
        ));
        s.push('\n');

        s.push_str("TRADES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Trade Events:        {}\n", r.trades));
        s.push_str(&format!("  Round Trips:         {}\n", self.stats.round_trips));
        s.push_str(&format!("  Winning Trips:       {}\n", self.stats.winning_trades));
        s.push_str(&format!("  Losing Trips:        {}\n", self.stats.losing_trades));
        s.push_str(&format!(
            "  Win Rate:            {}\n",
            fmt_optional(self.stats.win_rate_pct, 2, "%")
        ));
        s.push_str(&format!("  Commissions:         ${:.2}\n", self.stats.commissions));
        match r.open_position {
            Some(direction) => s.push_str(&format!(
                "  Open Position:       {} (unrealized ${:.2})\n",
                direction, r.unrealized_pnl
            )),
            None => s.push_str("  Open Position:       none\n"),
        }
        s.push('\n');

        s.push_str("EXECUTION\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Bars Processed:      {}\n", self.stats.bars_processed));
        s.push_str(&format!("  Sharpe Periods:      {}\n", self.stats.periods));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export the full report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV (equity curve only).
    pub fn equity_to_csv(&self) -> String {
        let mut csv = String::from("date,equity\n");
        for point in &self.equity_curve {
            csv.push_str(&format!("{},{}\n", point.date, point.equity));
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> BacktestResult {
        BacktestResult {
            tickers: vec!["AAPL".to_string(), "AMZN".to_string()],
            start_date: "2022-01-01".to_string(),
            end_date: "2023-12-31".to_string(),
            initial_portfolio: 100000.0,
            final_portfolio: 100012.34,
            total_return_pct: 0.01,
            sharpe_ratio: None,
            max_drawdown_pct: Some(0.05),
            trades: 3,
            open_position: Some(SpreadDirection::LongSpread),
            unrealized_pnl: 4.2,
        }
    }

    #[test]
    fn test_not_available_serialization() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["sharpe_ratio"], "N/A");
        assert_eq!(json["max_drawdown_pct"], 0.05);
        assert_eq!(json["initial_portfolio"], 100000.0);
        assert_eq!(json["open_position"], "LongSpread");
    }

    #[test]
    fn test_result_json_parses_back() {
        let result = sample_result();
        let parsed: BacktestResult = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(parsed, result);
        assert!(!parsed.ends_flat());
    }

    #[test]
    fn test_rejects_unknown_text_metric() {
        let mut json = serde_json::to_value(sample_result()).unwrap();
        json["sharpe_ratio"] = serde_json::Value::String("none".into());
        assert!(serde_json::from_value::<BacktestResult>(json).is_err());
    }
}
