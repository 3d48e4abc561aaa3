//! Volatility factors - measures of risk
//!
//! Volatility factors capture systematic risk exposure (beta) and the shape of
//! the return distribution (skewness, kurtosis).

pub mod beta;
pub mod kurtosis;
pub mod skewness;

pub use beta::{RollingBeta, rolling_beta};
pub use kurtosis::ReturnKurtosis;
pub use skewness::ReturnSkewness;

use crate::{Result, table::Table, traits::RollingFactor, window::ensure_window};
use tracing::debug;

/// Append `{ticker}_Skew_{window}d` and `{ticker}_Kurt_{window}d` columns for
/// each ticker, skew then kurtosis per ticker.
pub fn add_skew_kurtosis(returns: &mut Table, tickers: &[String], window: usize) -> Result<()> {
    ensure_window(window)?;
    let skew = ReturnSkewness::with_window(window);
    let kurt = ReturnKurtosis::with_window(window);

    let mut columns = Vec::with_capacity(tickers.len() * 2);
    for ticker in tickers {
        let values = returns.values(ticker)?;
        columns.push((skew.key(ticker), skew.compute(&values)));
        columns.push((kurt.key(ticker), kurt.compute(&values)));
    }

    for (key, values) in columns {
        debug!(column = %key, "appending rolling column");
        returns.append(key, values)?;
    }
    Ok(())
}
