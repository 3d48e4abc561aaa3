//! Time-series standardization of prices.
//!
//! The rolling z-score measures how far the latest price sits from its
//! trailing mean, in units of trailing sample standard deviation.

use crate::{
    DEFAULT_WINDOW, Result,
    registry::MetricKind,
    stats::{mean, sample_std},
    table::Table,
    traits::RollingFactor,
    window::trailing_windows,
};

/// Rolling z-score of a price series.
///
/// Computes `z_t = (P_t - mean) / std` where mean and sample standard deviation
/// (divisor `window - 1`) are taken over the `window` rows ending at and
/// including `t`.
///
/// A window of constant prices has zero standard deviation and yields a
/// non-finite z-score rather than an error.
///
/// # Appends
/// `{ticker}_ZScore_{window}d` to the price table.
#[derive(Debug, Clone)]
pub struct RollingZScore {
    window: usize,
}

impl RollingZScore {
    /// Create a new RollingZScore factor with the default window (60 rows).
    pub const fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    /// Create a RollingZScore factor with a custom window.
    pub const fn with_window(window: usize) -> Self {
        Self { window }
    }
}

impl Default for RollingZScore {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingFactor for RollingZScore {
    fn metric(&self) -> MetricKind {
        MetricKind::ZScore
    }

    fn window(&self) -> usize {
        self.window
    }

    fn compute(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        trailing_windows(values, self.window)
            .map(|window| {
                let window = window?;
                let current = window.last()?;
                let observations = window.observations()?;
                Some((current - mean(&observations)?) / sample_std(&observations)?)
            })
            .collect()
    }
}

/// Append `{ticker}_ZScore_{window}d` columns for each ticker.
pub fn add_zscore(prices: &mut Table, tickers: &[String], window: usize) -> Result<()> {
    RollingZScore::with_window(window).annotate(prices, tickers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ColumnKey;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn price_table(prices: Vec<Option<f64>>) -> Table {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..prices.len())
            .map(|i| start.checked_add_days(chrono::Days::new(i as u64)).unwrap())
            .collect();
        Table::from_columns(dates, [("AAPL", prices)]).unwrap()
    }

    #[test]
    fn test_zscore_of_linear_prices() {
        // Consecutive integers: sample variance over n rows is n(n+1)/12
        let window = 60;
        let prices: Vec<Option<f64>> = (0..100).map(|i| Some(50.0 + i as f64)).collect();
        let mut table = price_table(prices);

        add_zscore(&mut table, &["AAPL".to_string()], window).unwrap();
        let zscore = table
            .derived_values(&ColumnKey::new("AAPL", MetricKind::ZScore, window))
            .unwrap();

        let expected = 29.5 / (60.0_f64 * 61.0 / 12.0).sqrt();
        assert!(zscore[..window - 1].iter().all(Option::is_none));
        for value in &zscore[window - 1..] {
            assert_relative_eq!(value.unwrap(), expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_constant_window_is_non_finite() {
        let factor = RollingZScore::with_window(5);
        let values = vec![Some(42.17); 8];

        let zscore = factor.compute(&values);

        assert!(zscore[..4].iter().all(Option::is_none));
        assert!(zscore[4..].iter().all(|z| z.is_some_and(|z| !z.is_finite())));
    }

    #[test]
    fn test_gap_in_window_is_missing() {
        let factor = RollingZScore::with_window(3);
        let values = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(7.0)];

        let zscore = factor.compute(&values);

        assert_eq!(&zscore[..5], &[None, None, None, None, None]);
        // Window [4, 5, 7]: mean 16/3, sample std sqrt(7/3)
        assert_relative_eq!(
            zscore[5].unwrap(),
            (7.0 - 16.0 / 3.0) / (7.0_f64 / 3.0).sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_missing_ticker_leaves_table_untouched() {
        let mut table = price_table(vec![Some(1.0); 5]);
        let tickers = ["AAPL".to_string(), "MSFT".to_string()];

        assert!(add_zscore(&mut table, &tickers, 2).is_err());
        assert!(table.derived_keys().is_empty());
    }
}
