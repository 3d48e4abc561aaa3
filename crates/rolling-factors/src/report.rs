//! Console report of the annotated tables.

use crate::{
    Result,
    registry::MetricKind,
    table::{BetaTable, PriceTable, ReturnTable},
};
use polars::prelude::*;

/// Output of a pipeline run.
#[derive(Debug, Clone)]
pub struct FactorReport {
    prices: PriceTable,
    returns: ReturnTable,
    beta: BetaTable,
    window: usize,
}

impl FactorReport {
    /// Bundle the annotated tables of one run.
    pub const fn new(
        prices: PriceTable,
        returns: ReturnTable,
        beta: BetaTable,
        window: usize,
    ) -> Self {
        Self {
            prices,
            returns,
            beta,
            window,
        }
    }

    /// Prices with momentum and z-score columns.
    pub const fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Returns with skewness and kurtosis columns.
    pub const fn returns(&self) -> &ReturnTable {
        &self.returns
    }

    /// Rolling beta per ticker.
    pub const fn beta(&self) -> &BetaTable {
        &self.beta
    }

    /// Window the factors were computed with.
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Momentum columns.
    pub fn momentum(&self) -> Result<DataFrame> {
        self.prices.select_metrics(&[MetricKind::Momentum])
    }

    /// Z-score columns.
    pub fn zscore(&self) -> Result<DataFrame> {
        self.prices.select_metrics(&[MetricKind::ZScore])
    }

    /// Skewness columns followed by kurtosis columns.
    pub fn skew_kurtosis(&self) -> Result<DataFrame> {
        self.returns
            .select_metrics(&[MetricKind::Skewness, MetricKind::Kurtosis])
    }

    /// Last `tail_rows` rows of each section, titled.
    pub fn render(&self, tail_rows: usize) -> Result<String> {
        let window = self.window;
        let sections = [
            (
                format!("Rolling Beta ({window} days)"),
                self.beta.frame().clone(),
            ),
            (format!("Momentum ({window} days)"), self.momentum()?),
            (
                format!("Normalized Price (Z-Score over {window} days)"),
                self.zscore()?,
            ),
            (
                format!("Skewness and Kurtosis of Daily Returns ({window} days)"),
                self.skew_kurtosis()?,
            ),
        ];

        let mut out = String::new();
        for (title, frame) in sections {
            out.push_str(&format!("\n{title}:\n{}\n", frame.tail(Some(tail_rows))));
        }
        Ok(out)
    }
}
