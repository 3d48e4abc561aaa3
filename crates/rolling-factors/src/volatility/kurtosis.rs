//! Return kurtosis factor - tail heaviness measure.
//!
//! Kurtosis measures the "tailedness" of the return distribution. High kurtosis
//! indicates fat tails (more extreme returns than a normal distribution), while
//! low kurtosis indicates thin tails. We compute excess kurtosis (kurtosis - 3).
//!
//! Formula: `G2 = (n-1) / ((n-2)(n-3)) * ((n+1) * g2 + 6)` where
//! `g2 = m4 / m2² - 3` is the fourth standardized moment minus 3.
//!
//! Positive excess kurtosis indicates fat tails and greater risk of extreme moves.

use crate::{
    DEFAULT_WINDOW,
    registry::MetricKind,
    stats::excess_kurtosis,
    traits::RollingFactor,
    window::rolling_apply,
};

/// Return kurtosis factor.
///
/// Bias-corrected sample excess kurtosis of daily returns over a trailing
/// window. Needs at least 4 observations; windows with (near) zero variance
/// yield NaN.
///
/// # Appends
/// `{ticker}_Kurt_{window}d` to the returns table.
#[derive(Debug, Clone)]
pub struct ReturnKurtosis {
    window: usize,
}

impl ReturnKurtosis {
    /// Create a new ReturnKurtosis factor with the default window (60 rows).
    pub const fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    /// Create a ReturnKurtosis factor with a custom window.
    pub const fn with_window(window: usize) -> Self {
        Self { window }
    }
}

impl Default for ReturnKurtosis {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingFactor for ReturnKurtosis {
    fn metric(&self) -> MetricKind {
        MetricKind::Kurtosis
    }

    fn window(&self) -> usize {
        self.window
    }

    fn compute(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        rolling_apply(values, self.window, excess_kurtosis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_point_returns() {
        let factor = ReturnKurtosis::with_window(60);
        let values: Vec<Option<f64>> = (0..80)
            .map(|i| Some(if i % 2 == 0 { 0.02 } else { -0.02 }))
            .collect();

        let kurt = factor.compute(&values);

        let expected = 59.0 / (58.0 * 57.0) * (61.0 * -2.0 + 6.0);
        assert!(kurt[..59].iter().all(Option::is_none));
        for value in &kurt[59..] {
            assert_relative_eq!(value.unwrap(), expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_flat_returns_are_nan() {
        let factor = ReturnKurtosis::with_window(4);
        let kurt = factor.compute(&[Some(0.0); 6]);

        assert!(kurt[..3].iter().all(Option::is_none));
        assert!(kurt[3..].iter().all(|k| k.is_some_and(f64::is_nan)));
    }

    #[test]
    fn test_kurtosis_metadata() {
        let factor = ReturnKurtosis::new();
        assert_eq!(factor.window(), 60);
        assert_eq!(factor.metric(), MetricKind::Kurtosis);
        assert_eq!(factor.key("AAPL").to_string(), "AAPL_Kurt_60d");
    }
}
