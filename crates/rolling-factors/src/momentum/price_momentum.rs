//! Trailing price momentum.

use crate::{
    DEFAULT_WINDOW, Result,
    registry::MetricKind,
    table::Table,
    traits::RollingFactor,
};

/// Price momentum over a trailing window.
///
/// Measures the percentage price change over the past `window` rows:
/// `(P_t / P_{t-window}) - 1`
///
/// The first `window` rows of each ticker are missing, as is any row where
/// either price is missing. No smoothing is applied.
///
/// # Appends
/// `{ticker}_Mom_{window}d` to the price table.
#[derive(Debug, Clone)]
pub struct PriceMomentum {
    window: usize,
}

impl PriceMomentum {
    /// Create a new PriceMomentum factor with the default window (60 rows).
    pub const fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    /// Create a PriceMomentum factor with a custom window.
    pub const fn with_window(window: usize) -> Self {
        Self { window }
    }
}

impl Default for PriceMomentum {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingFactor for PriceMomentum {
    fn metric(&self) -> MetricKind {
        MetricKind::Momentum
    }

    fn window(&self) -> usize {
        self.window
    }

    fn compute(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        values
            .iter()
            .enumerate()
            .map(|(t, current)| {
                let lagged = t.checked_sub(self.window).and_then(|lag| values[lag])?;
                Some((*current)? / lagged - 1.0)
            })
            .collect()
    }
}

/// Append `{ticker}_Mom_{window}d` columns for each ticker.
pub fn add_momentum(prices: &mut Table, tickers: &[String], window: usize) -> Result<()> {
    PriceMomentum::with_window(window).annotate(prices, tickers)
}
