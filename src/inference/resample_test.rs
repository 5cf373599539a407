//! Combined permutation + bootstrap resample test.

use crate::core::{BootstrapResult, ConditionOrder, PermutationResult, ResampleOptions};
use crate::decompose::Decomposition;
use crate::errors::PlsResult;
use crate::inference::{bootstrap_test, permutation_test};
use crate::preprocess::Preprocess;
use faer::Mat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// Immutable bundle of both resample tests against one reference
/// decomposition.
///
/// Construction runs the permutation engine and then the bootstrap engine,
/// sequentially, over the shared read-only inputs. A single RNG seeded from
/// the options drives both, so a fixed seed reproduces the whole bundle.
#[derive(Debug, Clone)]
pub struct ResampleTest {
    /// Permutation test output.
    pub permutation: PermutationResult,
    /// Bootstrap test output.
    pub bootstrap: BootstrapResult,
    /// The quantile pair the bootstrap confidence interval was computed at.
    pub confidence_bounds: (f64, f64),
}

impl ResampleTest {
    /// Run both tests and return the combined result.
    ///
    /// `preprocess` must be the same transform that produced `reference`
    /// from the original data; `y`, when present, is resampled with the
    /// same row indices as `x` every iteration.
    pub fn run(
        x: &Mat<f64>,
        y: Option<&Mat<f64>>,
        reference: &Decomposition,
        cond_order: &ConditionOrder,
        preprocess: &dyn Preprocess,
        options: &ResampleOptions,
    ) -> PlsResult<Self> {
        options.validate()?;

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let permutation = permutation_test(
            x,
            y,
            reference,
            cond_order,
            options.n_permutations,
            preprocess,
            options.rotation,
            &mut rng,
        )?;

        let bootstrap = bootstrap_test(
            x,
            y,
            reference,
            cond_order,
            options.n_bootstraps,
            preprocess,
            options.rotation,
            options.confidence_bounds,
            &mut rng,
        )?;

        Ok(Self {
            permutation,
            bootstrap,
            confidence_bounds: options.confidence_bounds,
        })
    }
}

impl fmt::Display for ResampleTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Permutation Test Results")?;
        writeln!(f, "------------------------")?;
        write!(f, "Ratio ({} iterations):", self.permutation.iterations)?;
        for j in 0..self.permutation.ratio.nrows() {
            write!(f, " {:.4}", self.permutation.ratio[j])?;
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "Bootstrap Test Results")?;
        writeln!(f, "----------------------")?;
        writeln!(
            f,
            "Element-wise confidence interval: ({}, {})",
            self.confidence_bounds.0, self.confidence_bounds.1
        )?;
        writeln!(
            f,
            "Lower/upper CI: {} x {}",
            self.bootstrap.ci_lower.nrows(),
            self.bootstrap.ci_lower.ncols()
        )?;
        writeln!(
            f,
            "Standard errors / bootstrap ratios: {} x {} ({} iterations)",
            self.bootstrap.std_errors.nrows(),
            self.bootstrap.std_errors.ncols(),
            self.bootstrap.iterations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RotationMethod;
    use crate::decompose::decompose;
    use crate::preprocess::{MeanCenter, Preprocess};

    fn setup() -> (Mat<f64>, ConditionOrder, Decomposition) {
        let cond_order = ConditionOrder::generate(&[2, 2], 3).unwrap();
        let x = Mat::from_fn(12, 4, |i, j| {
            ((i * 7 + j * 3) as f64 * 0.29).sin() + (i % 2) as f64 * 0.6
        });
        let processed = MeanCenter.apply(&x, None, &cond_order).unwrap();
        let reference = decompose(&processed).unwrap();
        (x, cond_order, reference)
    }

    #[test]
    fn test_run_produces_both_results() {
        let (x, cond_order, reference) = setup();
        let options = ResampleOptions::builder()
            .n_permutations(10)
            .n_bootstraps(10)
            .seed(42)
            .build()
            .unwrap();

        let test = ResampleTest::run(&x, None, &reference, &cond_order, &MeanCenter, &options)
            .unwrap();

        assert_eq!(test.permutation.ratio.nrows(), reference.n_components());
        assert_eq!(test.bootstrap.ci_lower.nrows(), reference.u.nrows());
        assert_eq!(test.confidence_bounds, (0.05, 0.95));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let (x, cond_order, reference) = setup();
        let options = ResampleOptions::builder()
            .n_permutations(8)
            .n_bootstraps(8)
            .rotation(RotationMethod::Unrotated)
            .seed(1234)
            .build()
            .unwrap();

        let a = ResampleTest::run(&x, None, &reference, &cond_order, &MeanCenter, &options)
            .unwrap();
        let b = ResampleTest::run(&x, None, &reference, &cond_order, &MeanCenter, &options)
            .unwrap();

        for j in 0..a.permutation.ratio.nrows() {
            assert_eq!(a.permutation.ratio[j], b.permutation.ratio[j]);
        }
        for i in 0..a.bootstrap.ci_lower.nrows() {
            for j in 0..a.bootstrap.ci_lower.ncols() {
                assert_eq!(a.bootstrap.ci_lower[(i, j)], b.bootstrap.ci_lower[(i, j)]);
                assert_eq!(a.bootstrap.ci_upper[(i, j)], b.bootstrap.ci_upper[(i, j)]);
            }
        }
    }

    #[test]
    fn test_invalid_options_fail_before_any_work() {
        let (x, cond_order, reference) = setup();
        let options = ResampleOptions::builder()
            .n_permutations(0)
            .build_unchecked();

        let result = ResampleTest::run(&x, None, &reference, &cond_order, &MeanCenter, &options);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_summary() {
        let (x, cond_order, reference) = setup();
        let options = ResampleOptions::builder()
            .n_permutations(5)
            .n_bootstraps(5)
            .seed(3)
            .build()
            .unwrap();

        let test = ResampleTest::run(&x, None, &reference, &cond_order, &MeanCenter, &options)
            .unwrap();
        let summary = format!("{test}");
        assert!(summary.contains("Permutation Test Results"));
        assert!(summary.contains("Bootstrap Test Results"));
        assert!(summary.contains("(0.05, 0.95)"));
    }
}
