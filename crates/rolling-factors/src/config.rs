//! Pipeline configuration.

use crate::{DEFAULT_WINDOW, FactorError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

/// Large-cap US equity universe used when no tickers are configured.
pub const DEFAULT_TICKERS: [&str; 50] = [
    "AAPL", "MSFT", "GOOG", "AMZN", "META", "TSLA", "BRK-A", "JPM", "JNJ", "V", "PG", "UNH", "HD",
    "MA", "BAC", "XOM", "NVDA", "LLY", "AVGO", "COST", "PFE", "MRK", "ABT", "TMO", "CRM", "CMCSA",
    "VZ", "ADBE", "KO", "PEP", "NKE", "DIS", "CSCO", "INTC", "ORCL", "IBM", "TXN", "QCOM", "AMGN",
    "MDLZ", "SBUX", "GE", "LOW", "RTX", "CAT", "BA", "HON", "DE", "MMM", "AXP",
];

/// S&P 500 index symbol.
pub const DEFAULT_BENCHMARK: &str = "^GSPC";

/// Configuration for a pipeline run.
///
/// Fields missing from a JSON file take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Tickers to compute factors for.
    pub tickers: Vec<String>,
    /// Benchmark symbol for beta; fetched alongside the tickers.
    pub benchmark: String,
    /// Rolling window in rows (trading days).
    pub window: usize,
    /// Calendar days of price history ending at the run date.
    pub lookback_days: u32,
    /// Number of trailing rows shown per report section.
    pub tail_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(ToString::to_string).collect(),
            benchmark: DEFAULT_BENCHMARK.to_string(),
            window: DEFAULT_WINDOW,
            lookback_days: 365,
            tail_rows: 5,
        }
    }
}

impl PipelineConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(FactorError::InvalidWindow(self.window));
        }
        if self.tickers.is_empty() {
            return Err(FactorError::Config("ticker list is empty".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(repeated) = self.tickers.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(FactorError::Config(format!("ticker {repeated} is listed twice")));
        }
        if self.benchmark.trim().is_empty() {
            return Err(FactorError::Config("benchmark symbol is empty".to_string()));
        }
        if self.lookback_days == 0 {
            return Err(FactorError::Config("lookback_days must be positive".to_string()));
        }
        Ok(())
    }
}
