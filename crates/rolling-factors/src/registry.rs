//! Metric kinds and the keys that address derived columns.
//!
//! Derived columns are identified by a [`ColumnKey`] rather than by a
//! formatted string. The display form `{ticker}_{metric}_{window}d` is only
//! the column name used inside the backing DataFrame.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Rolling metric appended as a per-ticker column.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum MetricKind {
    /// Trailing percentage change of the price
    #[display("Mom")]
    Momentum,
    /// Price standardized against its trailing mean and standard deviation
    #[display("ZScore")]
    ZScore,
    /// Bias-corrected sample skewness of daily returns
    #[display("Skew")]
    Skewness,
    /// Bias-corrected sample excess kurtosis of daily returns
    #[display("Kurt")]
    Kurtosis,
}

/// Table a metric is computed from.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTable {
    /// Daily close prices
    #[display("prices")]
    Prices,
    /// Daily simple returns
    #[display("returns")]
    Returns,
}

impl MetricKind {
    /// Every metric, in pipeline order.
    pub const fn all() -> [Self; 4] {
        [Self::Momentum, Self::ZScore, Self::Skewness, Self::Kurtosis]
    }

    /// Human-readable description of what the metric measures.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Momentum => "Trailing percentage change: price[t] / price[t - window] - 1",
            Self::ZScore => "Price minus trailing mean, divided by trailing sample standard deviation",
            Self::Skewness => "Bias-corrected sample skewness of trailing daily returns",
            Self::Kurtosis => "Bias-corrected sample excess kurtosis of trailing daily returns",
        }
    }

    /// Table the metric reads its base column from.
    pub const fn input(self) -> InputTable {
        match self {
            Self::Momentum | Self::ZScore => InputTable::Prices,
            Self::Skewness | Self::Kurtosis => InputTable::Returns,
        }
    }
}

/// Key of a derived column: base ticker, metric and window length.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("{ticker}_{metric}_{window}d")]
pub struct ColumnKey {
    /// Base column the metric was computed from
    pub ticker: String,
    /// Metric kind
    pub metric: MetricKind,
    /// Window length in rows
    pub window: usize,
}

impl ColumnKey {
    /// Create a key for `ticker`.
    pub fn new(ticker: impl Into<String>, metric: MetricKind, window: usize) -> Self {
        Self {
            ticker: ticker.into(),
            metric,
            window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MetricKind::Momentum, "AAPL_Mom_60d")]
    #[case(MetricKind::ZScore, "AAPL_ZScore_60d")]
    #[case(MetricKind::Skewness, "AAPL_Skew_60d")]
    #[case(MetricKind::Kurtosis, "AAPL_Kurt_60d")]
    fn test_column_key_display(#[case] metric: MetricKind, #[case] expected: &str) {
        assert_eq!(ColumnKey::new("AAPL", metric, 60).to_string(), expected);
    }

    #[test]
    fn test_keys_distinguish_window() {
        let short = ColumnKey::new("MSFT", MetricKind::ZScore, 20);
        let long = ColumnKey::new("MSFT", MetricKind::ZScore, 60);
        assert_ne!(short, long);
        assert_eq!(short.to_string(), "MSFT_ZScore_20d");
    }

    #[test]
    fn test_metric_inputs() {
        assert_eq!(MetricKind::Momentum.input(), InputTable::Prices);
        assert_eq!(MetricKind::ZScore.input(), InputTable::Prices);
        assert_eq!(MetricKind::Skewness.input(), InputTable::Returns);
        assert_eq!(MetricKind::Kurtosis.input(), InputTable::Returns);
        assert!(MetricKind::all().iter().all(|m| !m.description().is_empty()));
    }
}
