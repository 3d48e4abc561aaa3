//! Daily simple returns from a price table.
//!
//! `return[t] = price[t] / price[t-1] - 1` for every value column. Returns are
//! computed for all columns jointly, then every row holding a missing value in
//! any column is dropped, so the first date always disappears and the date
//! index stays shared across tickers.

use crate::{
    FactorError, Result,
    table::{DATE_COLUMN, Table},
};
use polars::prelude::*;
use tracing::debug;

/// Compute the daily returns table of `prices`.
///
/// # Errors
/// - [`FactorError::InsufficientData`] if `prices` has fewer than 2 rows.
/// - [`FactorError::EmptyTable`] if `prices` has no value columns.
pub fn daily_returns(prices: &Table) -> Result<Table> {
    let available = prices.height();
    if available < 2 {
        return Err(FactorError::InsufficientData {
            required: 2,
            available,
        });
    }

    let columns = prices.base_columns();
    if columns.is_empty() {
        return Err(FactorError::EmptyTable);
    }

    let mut selection = vec![col(DATE_COLUMN)];
    selection.extend(columns.iter().map(|name| {
        (col(name.as_str()) / col(name.as_str()).shift(lit(1)) - lit(1.0)).alias(name.as_str())
    }));

    let frame = prices.frame().clone().lazy().select(selection).collect()?;
    let returns = Table::from_frame(prices.dates().to_vec(), frame);

    // Drop every row with a gap in any column
    let mut keep = vec![true; returns.height()];
    for name in &columns {
        for (row, value) in returns.values(name)?.into_iter().enumerate() {
            if value.is_none_or(f64::is_nan) {
                keep[row] = false;
            }
        }
    }

    let dropped = keep.iter().filter(|k| !**k).count();
    debug!(rows = available, dropped, "computed daily returns");

    returns.filter_rows(&keep)
}
