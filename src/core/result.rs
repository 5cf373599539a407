//! Result structures for the resample tests.

use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, Normal};

/// Outcome of the permutation test.
///
/// `ratio[j]` is the fraction of resampled decompositions whose j-th
/// singular value met or exceeded the reference's. A higher ratio means the
/// component is more consistent with chance.
#[derive(Debug, Clone)]
pub struct PermutationResult {
    /// Element-wise exceedance ratio, shaped like the reference singular
    /// values; every entry lies in [0, 1].
    pub ratio: Col<f64>,
    /// Number of permutation iterations that produced the ratio.
    pub iterations: usize,
}

/// Outcome of the bootstrap test.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// Element-wise lower confidence bound of the resampled left singular
    /// vectors, shaped like the reference U.
    pub ci_lower: Mat<f64>,
    /// Element-wise upper confidence bound, shaped like the reference U.
    pub ci_upper: Mat<f64>,
    /// Element-wise standard error of the mean of the resampled right
    /// singular vectors, shaped like the reference V.
    pub std_errors: Mat<f64>,
    /// Stability ratios: `std_errors` divided element-wise by the reference
    /// V. Near-zero reference entries produce non-finite ratios; that is
    /// signal, not an error.
    pub bootstrap_ratios: Mat<f64>,
    /// Number of bootstrap iterations behind the estimates.
    pub iterations: usize,
}

impl BootstrapResult {
    /// Two-tailed standard normal tail probability of each bootstrap ratio,
    /// reading the ratios as approximate z-scores.
    ///
    /// Non-finite ratios map to 0 (infinite) or NaN (undefined).
    pub fn ratio_p_values(&self) -> Mat<f64> {
        let normal = Normal::new(0.0, 1.0).ok();
        let n = self.bootstrap_ratios.nrows();
        let p = self.bootstrap_ratios.ncols();
        let mut p_values = Mat::zeros(n, p);
        for i in 0..n {
            for j in 0..p {
                let ratio = self.bootstrap_ratios[(i, j)];
                p_values[(i, j)] = if ratio.is_nan() {
                    f64::NAN
                } else {
                    normal
                        .as_ref()
                        .map_or(f64::NAN, |d| 2.0 * (1.0 - d.cdf(ratio.abs())))
                };
            }
        }
        p_values
    }
}
