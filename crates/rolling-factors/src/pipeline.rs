//! End-to-end factor pipeline.
//!
//! prices → returns → {beta, momentum, z-score, skew/kurtosis}. Each stage
//! reads the tables produced before it and never feeds back. Any error aborts
//! the run without a partial report.

use crate::{
    Result,
    config::PipelineConfig,
    momentum::add_momentum,
    report::FactorReport,
    returns::daily_returns,
    source::{PriceRequest, PriceSource},
    standardize::add_zscore,
    table::PriceTable,
    volatility::{add_skew_kurtosis, rolling_beta},
};
use chrono::NaiveDate;
use tracing::info;

/// Runs every factor stage for a configured universe.
#[derive(Debug, Clone)]
pub struct FactorPipeline {
    config: PipelineConfig,
}

impl FactorPipeline {
    /// Create a pipeline from a validated configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration driving this pipeline.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Price request covering the configured lookback before `end`.
    pub fn request(&self, end: NaiveDate) -> Result<PriceRequest> {
        PriceRequest::trailing(
            self.config.tickers.clone(),
            self.config.benchmark.clone(),
            end,
            self.config.lookback_days,
        )
    }

    /// Compute every factor from a price table holding the tickers and benchmark.
    pub fn run(&self, mut prices: PriceTable) -> Result<FactorReport> {
        let PipelineConfig {
            tickers,
            benchmark,
            window,
            ..
        } = &self.config;
        let window = *window;

        info!(
            rows = prices.height(),
            tickers = tickers.len(),
            benchmark = %benchmark,
            window,
            "running factor pipeline"
        );

        let mut returns = daily_returns(&prices)?;
        info!(rows = returns.height(), "daily returns ready");

        let beta = rolling_beta(&returns, tickers, benchmark, window)?;
        info!("rolling beta ready");

        add_momentum(&mut prices, tickers, window)?;
        add_zscore(&mut prices, tickers, window)?;
        info!(columns = prices.derived_keys().len(), "price factors ready");

        add_skew_kurtosis(&mut returns, tickers, window)?;
        info!(columns = returns.derived_keys().len(), "return moments ready");

        Ok(FactorReport::new(prices, returns, beta, window))
    }

    /// Load prices for the lookback ending at `end` and run the pipeline.
    pub fn fetch_and_run(&self, source: &dyn PriceSource, end: NaiveDate) -> Result<FactorReport> {
        let request = self.request(end)?;
        info!(start = %request.start, end = %request.end, "fetching prices");
        let prices = source.fetch(&request)?;
        self.run(prices)
    }
}
