//! Bootstrap test engine.
//!
//! Estimates confidence intervals and stability ratios for the reference
//! singular vectors by repeatedly re-decomposing with-replacement resamples
//! of the data and accumulating the per-iteration factors.

use crate::core::{BootstrapResult, ConditionOrder, OptionsError, RotationMethod};
use crate::decompose::Decomposition;
use crate::errors::{PlsError, PlsResult};
use crate::preprocess::Preprocess;
use crate::resample::{bootstrap_indices, gather_rows};
use crate::utils::{quantile, standard_error_of_mean};
use faer::Mat;
use rand::Rng;
use tracing::{debug, info};

/// Run the bootstrap test.
///
/// Each round resamples the rows of `x` (and `y`, with the same indices)
/// with replacement within each (group, condition) cell, preprocesses the
/// resample, derives the factors under `rotation`, and writes them into the
/// round's slot. After the loop, the left-vector slots yield the
/// element-wise quantile confidence interval at `confidence_bounds`, and
/// the right-vector slots yield standard errors and stability ratios
/// against the reference V.
///
/// Stability ratios at near-zero reference entries come out non-finite by
/// design; they flag unstable components and must not be clamped.
#[allow(clippy::too_many_arguments)]
pub fn bootstrap_test<R: Rng>(
    x: &Mat<f64>,
    y: Option<&Mat<f64>>,
    reference: &Decomposition,
    cond_order: &ConditionOrder,
    iterations: usize,
    preprocess: &dyn Preprocess,
    rotation: RotationMethod,
    confidence_bounds: (f64, f64),
    rng: &mut R,
) -> PlsResult<BootstrapResult> {
    super::permutation::validate_inputs(x, y, reference, cond_order, iterations)
        .map_err(reclassify_iteration_error)?;

    let (lower_q, upper_q) = confidence_bounds;
    if !(0.0..=1.0).contains(&lower_q) || !(0.0..=1.0).contains(&upper_q) || lower_q > upper_q {
        return Err(PlsError::InvalidOptions(
            OptionsError::InvalidConfidenceBounds(lower_q, upper_q),
        ));
    }

    let u_rows = reference.u.nrows();
    let v_rows = reference.v.nrows();
    let k = reference.n_components();

    // one slot per iteration, written exactly once
    let mut u_sampled: Vec<Mat<f64>> = Vec::with_capacity(iterations);
    let mut v_sampled: Vec<Mat<f64>> = Vec::with_capacity(iterations);

    info!(iterations, "running bootstrap test");
    for iter in 0..iterations {
        if (iter + 1) % 50 == 0 {
            debug!(iteration = iter + 1, "bootstrap progress");
        }

        let indices = bootstrap_indices(cond_order, rng);
        let x_new = gather_rows(x, &indices);
        let resampled = match y {
            Some(y_mat) => {
                let y_new = gather_rows(y_mat, &indices);
                preprocess.apply(&x_new, Some(&y_new), cond_order)?
            }
            None => preprocess.apply(&x_new, None, cond_order)?,
        };

        let factors = rotation.factors(&resampled, reference)?;
        if factors.u.nrows() != u_rows
            || factors.v.nrows() != v_rows
            || factors.n_components() != k
        {
            return Err(PlsError::ComponentMismatch {
                expected: k,
                got: factors.n_components(),
            });
        }

        u_sampled.push(factors.u);
        v_sampled.push(factors.v);
    }

    let mut ci_lower = Mat::zeros(u_rows, k);
    let mut ci_upper = Mat::zeros(u_rows, k);
    let mut samples = vec![0.0; iterations];
    for i in 0..u_rows {
        for j in 0..k {
            for (slot, value) in samples.iter_mut().zip(&u_sampled) {
                *slot = value[(i, j)];
            }
            ci_lower[(i, j)] = quantile(&samples, lower_q);
            ci_upper[(i, j)] = quantile(&samples, upper_q);
        }
    }

    let mut std_errors = Mat::zeros(v_rows, k);
    let mut bootstrap_ratios = Mat::zeros(v_rows, k);
    for i in 0..v_rows {
        for j in 0..k {
            for (slot, value) in samples.iter_mut().zip(&v_sampled) {
                *slot = value[(i, j)];
            }
            let se = standard_error_of_mean(&samples);
            std_errors[(i, j)] = se;
            bootstrap_ratios[(i, j)] = se / reference.v[(i, j)];
        }
    }

    Ok(BootstrapResult {
        ci_lower,
        ci_upper,
        std_errors,
        bootstrap_ratios,
        iterations,
    })
}

/// The shared validator reports a permutation-count error; for this engine
/// the same failure is a bootstrap-count error.
fn reclassify_iteration_error(err: PlsError) -> PlsError {
    match err {
        PlsError::InvalidOptions(OptionsError::InvalidPermutations(n)) => {
            PlsError::InvalidOptions(OptionsError::InvalidBootstraps(n))
        }
        other => other,
    }
}
