//! Sample statistics over a single window of observations.
//!
//! All functions return `None` when the window is too short for the statistic
//! to be defined. Windows whose values are all identical have a mean equal to
//! that value and a variance of exactly zero, so ratios against the variance
//! come out non-finite instead of amplifying rounding noise.

/// Biased second moment below which skewness and kurtosis are undefined.
const DEGENERATE_VARIANCE: f64 = 1e-14;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    if values.iter().all(|&v| v == first) {
        return Some(first);
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with divisor `n - 1`.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mu = mean(values)?;
    let sum_sq: f64 = values.iter().map(|&v| (v - mu).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation with divisor `n - 1`.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Sample covariance with divisor `n - 1`.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    let sum: f64 = x.iter().zip(y).map(|(&a, &b)| (a - mx) * (b - my)).sum();
    Some(sum / (x.len() - 1) as f64)
}

/// `Cov(market, asset) / Var(market)`.
///
/// A constant market window gives a zero denominator and a non-finite beta.
pub fn beta(market: &[f64], asset: &[f64]) -> Option<f64> {
    Some(sample_covariance(market, asset)? / sample_variance(market)?)
}

/// Central moments `(m2, m3, m4)` with divisor `n`.
fn central_moments(values: &[f64]) -> Option<(f64, f64, f64)> {
    let mu = mean(values)?;
    let n = values.len() as f64;
    let (s2, s3, s4) = values.iter().fold((0.0, 0.0, 0.0), |(s2, s3, s4), &v| {
        let d = v - mu;
        let d2 = d * d;
        (s2 + d2, s3 + d2 * d, s4 + d2 * d2)
    });
    Some((s2 / n, s3 / n, s4 / n))
}

/// Bias-corrected sample skewness (G1). Needs at least 3 observations.
pub fn skewness(values: &[f64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }
    let (m2, m3, _) = central_moments(values)?;
    if m2 <= DEGENERATE_VARIANCE {
        return Some(f64::NAN);
    }
    let n = values.len() as f64;
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (n * (n - 1.0)).sqrt() / (n - 2.0))
}

/// Bias-corrected sample excess kurtosis (G2). Needs at least 4 observations.
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    if values.len() < 4 {
        return None;
    }
    let (m2, _, m4) = central_moments(values)?;
    if m2 <= DEGENERATE_VARIANCE {
        return Some(f64::NAN);
    }
    let n = values.len() as f64;
    let g2 = m4 / (m2 * m2) - 3.0;
    Some((n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * g2 + 6.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_of_constant_is_exact() {
        let values = [100.1; 60];
        assert_eq!(mean(&values), Some(100.1));
        assert_eq!(sample_variance(&values), Some(0.0));
    }

    #[test]
    fn test_sample_variance_uses_n_minus_one() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Sum of squared deviations is 32 around a mean of 5
        assert_relative_eq!(sample_variance(&values).unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        assert!(sample_variance(&[1.0]).is_none());
    }

    #[test]
    fn test_covariance_of_scaled_series() {
        let x = [0.01, -0.02, 0.015, 0.003, -0.007];
        let y: Vec<f64> = x.iter().map(|v| v * 3.0).collect();
        assert_relative_eq!(beta(&x, &y).unwrap(), 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_beta_with_constant_market_is_non_finite() {
        let market = [0.01; 10];
        let asset = [0.02, 0.01, 0.0, 0.03, 0.01, 0.02, 0.0, 0.01, 0.02, 0.01];
        assert!(!beta(&market, &asset).unwrap().is_finite());
    }

    #[test]
    fn test_skewness_small_sample() {
        // Deviations around 7/3 are -4/3, -1/3, 5/3
        let m2: f64 = 14.0 / 9.0;
        let m3 = 20.0 / 27.0;
        let expected = m3 / m2.powf(1.5) * 6.0_f64.sqrt();
        assert_relative_eq!(skewness(&[1.0, 2.0, 4.0]).unwrap(), expected, max_relative = 1e-12);
        assert!(skewness(&[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_symmetric_series_has_zero_skew() {
        let values: Vec<f64> = (0..60).map(|i| if i % 2 == 0 { 0.01 } else { -0.01 }).collect();
        assert_relative_eq!(skewness(&values).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_excess_kurtosis_of_two_point_series() {
        // Two-point distribution: g2 = -2, so G2 = 59 / (58 * 57) * (61 * -2 + 6)
        let values: Vec<f64> = (0..60).map(|i| if i % 2 == 0 { 0.01 } else { -0.01 }).collect();
        let expected = 59.0 / (58.0 * 57.0) * (-116.0);
        assert_relative_eq!(excess_kurtosis(&values).unwrap(), expected, max_relative = 1e-9);
        assert!(excess_kurtosis(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_degenerate_moments_are_nan() {
        let values = [0.005; 20];
        assert!(skewness(&values).unwrap().is_nan());
        assert!(excess_kurtosis(&values).unwrap().is_nan());
    }
}
