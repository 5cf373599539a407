//! Scalar statistics helpers for the resample engines.

/// Linear-interpolation quantile of a sample, `tau` in [0, 1].
///
/// Uses the `(n - 1) * tau` positioning convention, so `quantile(s, 0.0)`
/// is the minimum and `quantile(s, 1.0)` the maximum.
pub fn quantile(samples: &[f64], tau: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let position = (sorted.len() - 1) as f64 * tau;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;

    if lower + 1 < sorted.len() && fraction > 0.0 {
        sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
    } else {
        sorted[lower]
    }
}

/// Standard error of the mean: sample standard deviation (n - 1 divisor)
/// divided by sqrt(n). NaN for fewer than two samples.
pub fn standard_error_of_mean(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean: f64 = samples.iter().sum::<f64>() / n as f64;
    let variance: f64 =
        samples.iter().map(|&s| (s - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    (variance / n as f64).sqrt()
}
