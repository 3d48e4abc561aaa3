//! Core trait definitions for rolling factors.
//!
//! Per-ticker rolling metrics implement [`RollingFactor`], which turns one base
//! column into one derived column of the same length and appends it to the
//! table under a [`ColumnKey`].

use crate::{
    Result,
    registry::{ColumnKey, MetricKind},
    table::Table,
    window::ensure_window,
};
use tracing::debug;

/// A trailing-window metric computed per ticker.
pub trait RollingFactor: Send + Sync + std::fmt::Debug {
    /// Metric this factor produces.
    fn metric(&self) -> MetricKind;

    /// Window length in rows.
    fn window(&self) -> usize;

    /// Compute the derived column from a base column.
    ///
    /// The output has one cell per input cell. A cell at row `t` may only
    /// depend on rows up to and including `t`.
    fn compute(&self, values: &[Option<f64>]) -> Vec<Option<f64>>;

    /// Human-readable description of what this factor measures.
    fn description(&self) -> &str {
        self.metric().description()
    }

    /// Key of the column this factor appends for `ticker`.
    fn key(&self, ticker: &str) -> ColumnKey {
        ColumnKey::new(ticker, self.metric(), self.window())
    }

    /// Append one derived column per ticker to `table`.
    ///
    /// All columns are computed before any is appended, so a missing ticker
    /// leaves the table unchanged.
    fn annotate(&self, table: &mut Table, tickers: &[String]) -> Result<()> {
        ensure_window(self.window())?;

        let columns = tickers
            .iter()
            .map(|ticker| -> Result<(ColumnKey, Vec<Option<f64>>)> {
                Ok((self.key(ticker), self.compute(&table.values(ticker)?)))
            })
            .collect::<Result<Vec<_>>>()?;

        for (key, values) in columns {
            debug!(column = %key, "appending rolling column");
            table.append(key, values)?;
        }
        Ok(())
    }
}
