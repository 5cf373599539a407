//! Permutation test engine.
//!
//! Estimates the null distribution of the reference singular values by
//! repeatedly re-decomposing condition-shuffled resamples of the data and
//! counting element-wise exceedances.

use crate::core::{ConditionOrder, OptionsError, PermutationResult, RotationMethod};
use crate::decompose::Decomposition;
use crate::errors::{PlsError, PlsResult};
use crate::preprocess::Preprocess;
use crate::resample::{gather_rows, permutation_indices};
use faer::{Col, Mat};
use rand::Rng;
use tracing::{debug, info};

/// Run the permutation test.
///
/// Each round resamples the rows of `x` (and `y`, with the same row order)
/// without replacement within group blocks, preprocesses the resample with
/// the caller's transform, obtains singular values under `rotation`, and
/// counts where the resampled value meets or exceeds the reference.
///
/// Returns the element-wise exceedance ratio in [0, 1]: higher means more
/// consistent with chance.
#[allow(clippy::too_many_arguments)]
pub fn permutation_test<R: Rng>(
    x: &Mat<f64>,
    y: Option<&Mat<f64>>,
    reference: &Decomposition,
    cond_order: &ConditionOrder,
    iterations: usize,
    preprocess: &dyn Preprocess,
    rotation: RotationMethod,
    rng: &mut R,
) -> PlsResult<PermutationResult> {
    validate_inputs(x, y, reference, cond_order, iterations)?;

    let k = reference.n_components();
    let mut exceedances = Col::<f64>::zeros(k);

    info!(iterations, "running permutation test");
    for iter in 0..iterations {
        if (iter + 1) % 50 == 0 {
            debug!(iteration = iter + 1, "permutation progress");
        }

        let indices = permutation_indices(cond_order, rng);
        let x_new = gather_rows(x, &indices);
        let permuted = match y {
            Some(y_mat) => {
                let y_new = gather_rows(y_mat, &indices);
                preprocess.apply(&x_new, Some(&y_new), cond_order)?
            }
            None => preprocess.apply(&x_new, None, cond_order)?,
        };

        let s_hat = rotation.singular_values(&permuted, reference)?;
        if s_hat.nrows() != k {
            return Err(PlsError::ComponentMismatch {
                expected: k,
                got: s_hat.nrows(),
            });
        }

        for j in 0..k {
            if s_hat[j] >= reference.s[j] {
                exceedances[j] += 1.0;
            }
        }
    }

    let ratio = Col::from_fn(k, |j| exceedances[j] / iterations as f64);
    Ok(PermutationResult { ratio, iterations })
}

pub(crate) fn validate_inputs(
    x: &Mat<f64>,
    y: Option<&Mat<f64>>,
    reference: &Decomposition,
    cond_order: &ConditionOrder,
    iterations: usize,
) -> PlsResult<()> {
    if iterations < 1 {
        return Err(PlsError::InvalidOptions(OptionsError::InvalidPermutations(
            iterations,
        )));
    }
    if reference.n_components() == 0 {
        return Err(PlsError::InsufficientObservations { needed: 1, got: 0 });
    }
    cond_order.validate_rows(x.nrows())?;
    if let Some(y_mat) = y {
        if y_mat.nrows() != x.nrows() {
            return Err(PlsError::PairedRowMismatch {
                x_rows: x.nrows(),
                y_rows: y_mat.nrows(),
            });
        }
    }
    Ok(())
}
