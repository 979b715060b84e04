//! Resampling periods for return statistics.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Period over which equity is resampled before computing the Sharpe ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SharpePeriod {
    Daily,
    Weekly,
    Monthly,
    #[default]
    Annual,
}

impl SharpePeriod {
    /// Number of periods in a year.
    pub fn periods_per_year(&self) -> f64 {
        match self {
            SharpePeriod::Daily => 252.0,
            SharpePeriod::Weekly => 52.0,
            SharpePeriod::Monthly => 12.0,
            SharpePeriod::Annual => 1.0,
        }
    }

    /// Bucket key of the period that contains `date`.
    ///
    /// Daily buckets are keyed by the ordinal day, weekly by ISO week.
    pub fn bucket(&self, date: NaiveDate) -> (i32, u32) {
        match self {
            SharpePeriod::Daily => (date.year(), date.ordinal()),
            SharpePeriod::Weekly => {
                let week = date.iso_week();
                (week.year(), week.week())
            }
            SharpePeriod::Monthly => (date.year(), date.month()),
            SharpePeriod::Annual => (date.year(), 0),
        }
    }
}

impl fmt::Display for SharpePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SharpePeriod::Daily => "daily",
            SharpePeriod::Weekly => "weekly",
            SharpePeriod::Monthly => "monthly",
            SharpePeriod::Annual => "annual",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SharpePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "1d" => Ok(SharpePeriod::Daily),
            "weekly" | "1w" => Ok(SharpePeriod::Weekly),
            "monthly" | "1m" => Ok(SharpePeriod::Monthly),
            "annual" | "yearly" | "1y" => Ok(SharpePeriod::Annual),
            _ => Err(format!("Invalid Sharpe period: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parsing() {
        assert_eq!("annual".parse::<SharpePeriod>().unwrap(), SharpePeriod::Annual);
        assert_eq!("Monthly".parse::<SharpePeriod>().unwrap(), SharpePeriod::Monthly);
        assert!("hourly".parse::<SharpePeriod>().is_err());
    }

    #[test]
    fn test_weekly_bucket_crosses_year() {
        // 2024-12-30 belongs to ISO week 1 of 2025
        let d1 = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(SharpePeriod::Weekly.bucket(d1), SharpePeriod::Weekly.bucket(d2));
        assert_ne!(SharpePeriod::Annual.bucket(d1), SharpePeriod::Annual.bucket(d2));
    }
}
