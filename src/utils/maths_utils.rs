use statrs::statistics::Statistics;

/// Arithmetic mean, `None` for an empty slice (never a mean of zero elements).
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// Pearson correlation of two equally long samples.
/// `None` when fewer than two points or either side has zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let covariance = xs.iter().covariance(ys.iter());
    let denominator = xs.iter().std_dev() * ys.iter().std_dev();
    if !denominator.is_finite() || denominator == 0.0 {
        return None;
    }
    Some(covariance / denominator)
}

/// Slope of the least-squares line `y = slope * x + intercept`.
pub fn linear_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let variance = xs.iter().variance();
    if !variance.is_finite() || variance == 0.0 {
        return None;
    }
    Some(xs.iter().covariance(ys.iter()) / variance)
}
