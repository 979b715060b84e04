//! CSV price provider.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use pairs_core::{AlignedPrices, DataError, PricePoint, PriceProvider, PriceSeries};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::align;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(rename = "Adj Close", alias = "adj_close", alias = "AdjClose", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Close", default)]
    close: Option<f64>,
}

impl CsvRecord {
    /// Adjusted close when present, plain close otherwise.
    fn price(&self) -> f64 {
        self.adj_close.or(self.close).unwrap_or(f64::NAN)
    }
}

/// Reads one `<TICKER>.csv` file per ticker from a directory.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    dir: PathBuf,
}

impl CsvPriceProvider {
    /// Create a provider over a data directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("data directory '{}' does not exist", dir.display()),
            )));
        }
        Ok(Self { dir })
    }

    /// Data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Locate the file for a ticker, trying a few naming conventions.
    fn find_file(&self, ticker: &str) -> Option<PathBuf> {
        let lower = ticker.to_lowercase();
        [
            format!("{}.csv", ticker),
            format!("{}.csv", lower),
            format!("{}_daily.csv", ticker),
            format!("{}_daily.csv", lower),
        ]
        .into_iter()
        .map(|name| self.dir.join(name))
        .find(|path| path.is_file())
    }

    /// Load the full history of one ticker.
    pub fn load_series(&self, ticker: &str) -> Result<PriceSeries, DataError> {
        let path = self
            .find_file(ticker)
            .ok_or_else(|| DataError::SymbolNotFound(ticker.to_string()))?;
        debug!("Loading {} from {}", ticker, path.display());
        load_from_path(ticker, &path)
    }
}

#[async_trait]
impl PriceProvider for CsvPriceProvider {
    async fn fetch(
        &self,
        tickers: &[String; 2],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AlignedPrices, DataError> {
        let series1 = self.load_series(&tickers[0])?.between(start, end);
        let series2 = self.load_series(&tickers[1])?.between(start, end);
        info!(
            "Loaded {} bars for {} and {} bars for {}",
            series1.len(),
            tickers[0],
            series2.len(),
            tickers[1]
        );
        align(&series1, &series2)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Load a series from a specific path.
fn load_from_path(ticker: &str, path: &Path) -> Result<PriceSeries, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut points = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let date = parse_date(&record.date)?;
        points.push(PricePoint::new(date, record.price()));
    }

    PriceSeries::from_unsorted(ticker, points)
}

/// Parse various date formats.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let date_str = date_str.trim();
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
