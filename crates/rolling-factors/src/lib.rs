#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rolling-factors/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod momentum;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod returns;
pub mod source;
pub mod standardize;
pub mod stats;
pub mod table;
pub mod traits;
pub mod volatility;
pub mod window;

// Re-export core types
pub use config::PipelineConfig;
pub use error::{FactorError, Result};
pub use momentum::{PriceMomentum, add_momentum};
pub use pipeline::FactorPipeline;
pub use registry::{ColumnKey, InputTable, MetricKind};
pub use report::FactorReport;
pub use returns::daily_returns;
pub use source::{CsvPriceSource, PriceRequest, PriceSource};
pub use standardize::{RollingZScore, add_zscore};
pub use table::{BetaTable, DATE_COLUMN, PriceTable, ReturnTable, Table};
pub use traits::RollingFactor;
pub use volatility::{ReturnKurtosis, ReturnSkewness, RollingBeta, add_skew_kurtosis, rolling_beta};
pub use window::{PairedWindow, TrailingWindows, Window, paired_windows, rolling_apply, trailing_windows};

/// Default rolling window in rows (trading days).
pub const DEFAULT_WINDOW: usize = 60;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
