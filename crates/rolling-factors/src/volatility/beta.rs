//! Rolling market beta - systematic risk exposure.
//!
//! Beta measures the sensitivity of a security's returns to benchmark returns:
//! `β = Cov(R_i, R_m) / Var(R_m)`
//!
//! Higher beta indicates greater systematic risk. Beta = 1 means the security
//! moves in line with the market. Beta > 1 indicates amplified market movements.

use crate::{
    DEFAULT_WINDOW, Result,
    stats,
    table::{BetaTable, Table},
    window::{ensure_window, paired_windows},
};
use tracing::debug;

/// Rolling beta of each ticker against a benchmark.
///
/// Uses sample covariance and sample variance (divisor `window - 1`) over the
/// trailing `window` return rows. Beta is a two-series relationship, so it is
/// held in its own table (one column per ticker) instead of being appended to
/// the returns table.
#[derive(Debug, Clone)]
pub struct RollingBeta {
    benchmark: String,
    window: usize,
}

impl RollingBeta {
    /// Create a RollingBeta against `benchmark` with the default window (60 rows).
    pub fn new(benchmark: impl Into<String>) -> Self {
        Self::with_window(benchmark, DEFAULT_WINDOW)
    }

    /// Create a RollingBeta against `benchmark` with a custom window.
    pub fn with_window(benchmark: impl Into<String>, window: usize) -> Self {
        Self {
            benchmark: benchmark.into(),
            window,
        }
    }

    /// Benchmark column name.
    pub fn benchmark(&self) -> &str {
        &self.benchmark
    }

    /// Window length in rows.
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Rolling beta of one return column against the benchmark column.
    ///
    /// Rows without `window` complete pairs are missing. A constant benchmark
    /// window yields a non-finite beta.
    pub fn compute(&self, market: &[Option<f64>], asset: &[Option<f64>]) -> Vec<Option<f64>> {
        paired_windows(market, asset, self.window)
            .map(|pair| {
                let (market, asset) = pair?.observations()?;
                stats::beta(&market, &asset)
            })
            .collect()
    }

    /// Beta table for `tickers`, on the same date index as `returns`.
    ///
    /// # Errors
    /// [`crate::FactorError::MissingColumn`] if the benchmark or a ticker is not
    /// a column of `returns`.
    pub fn table(&self, returns: &Table, tickers: &[String]) -> Result<BetaTable> {
        ensure_window(self.window)?;
        let market = returns.values(&self.benchmark)?;

        let mut columns = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let asset = returns.values(ticker)?;
            debug!(ticker = %ticker, benchmark = %self.benchmark, "computing rolling beta");
            columns.push((ticker.clone(), self.compute(&market, &asset)));
        }

        Table::from_columns(returns.dates().to_vec(), columns)
    }
}

/// Rolling beta of each ticker's returns against `benchmark`.
pub fn rolling_beta(
    returns: &Table,
    tickers: &[String],
    benchmark: &str,
    window: usize,
) -> Result<BetaTable> {
    RollingBeta::with_window(benchmark, window).table(returns, tickers)
}
