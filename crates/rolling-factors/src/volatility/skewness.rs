//! Return skewness factor - asymmetry measure.
//!
//! Skewness measures the asymmetry of the return distribution. Negative skewness
//! indicates a distribution with a longer left tail (more extreme negative returns),
//! while positive skewness indicates a longer right tail.
//!
//! Formula: `G1 = g1 * sqrt(n(n-1)) / (n-2)` where `g1 = m3 / m2^1.5` is the
//! third standardized moment of the window.

use crate::{
    DEFAULT_WINDOW,
    registry::MetricKind,
    stats::skewness,
    traits::RollingFactor,
    window::rolling_apply,
};

/// Return skewness factor.
///
/// Bias-corrected sample skewness of daily returns over a trailing window.
/// Needs at least 3 observations; windows with (near) zero variance yield NaN.
///
/// # Appends
/// `{ticker}_Skew_{window}d` to the returns table.
#[derive(Debug, Clone)]
pub struct ReturnSkewness {
    window: usize,
}

impl ReturnSkewness {
    /// Create a new ReturnSkewness factor with the default window (60 rows).
    pub const fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    /// Create a ReturnSkewness factor with a custom window.
    pub const fn with_window(window: usize) -> Self {
        Self { window }
    }
}

impl Default for ReturnSkewness {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingFactor for ReturnSkewness {
    fn metric(&self) -> MetricKind {
        MetricKind::Skewness
    }

    fn window(&self) -> usize {
        self.window
    }

    fn compute(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        rolling_apply(values, self.window, skewness)
    }
}
