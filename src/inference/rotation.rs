//! Rotation strategies shared by the permutation and bootstrap engines.
//!
//! Each resampled matrix must be compared against the reference
//! decomposition. The three strategies differ in how the resampled
//! solution is aligned with the reference before that comparison; both
//! engines invoke them through the same two entry points so the variants
//! cannot drift apart.

use crate::core::RotationMethod;
use crate::decompose::{self, Decomposition};
use crate::errors::{PlsError, PlsResult};
use crate::utils::{column_norms, matmul, matmul_transpose, transpose_matmul};
use faer::{Col, Mat};

impl RotationMethod {
    /// Singular values of the resampled matrix under this strategy.
    ///
    /// Used by the permutation engine, which never needs the vectors.
    pub(crate) fn singular_values(
        self,
        permuted: &Mat<f64>,
        reference: &Decomposition,
    ) -> PlsResult<Col<f64>> {
        ensure_compatible(permuted, reference)?;
        match self {
            Self::Unrotated => decompose::singular_values(permuted),
            Self::Procrustes => {
                let resampled = decompose::decompose(permuted)?;
                let rot = procrustes_rotation(&reference.v, &resampled.v)?;
                let v_rot = matmul(&resampled.v, &rot);
                Ok(column_norms(&matmul(permuted, &v_rot)))
            }
            Self::Derived => {
                let projected = matmul(permuted, &reference.v);
                Ok(column_norms(&projected))
            }
        }
    }

    /// Full factors of the resampled matrix under this strategy.
    ///
    /// Used by the bootstrap engine, which accumulates both vector sets.
    pub(crate) fn factors(
        self,
        permuted: &Mat<f64>,
        reference: &Decomposition,
    ) -> PlsResult<Decomposition> {
        ensure_compatible(permuted, reference)?;
        match self {
            Self::Unrotated => decompose::decompose(permuted),
            Self::Procrustes => {
                let resampled = decompose::decompose(permuted)?;
                let rot = procrustes_rotation(&reference.v, &resampled.v)?;
                let u = matmul(&resampled.u, &rot);
                let v = matmul(&resampled.v, &rot);
                let s = column_norms(&matmul(permuted, &v));
                Ok(Decomposition { u, s, v })
            }
            Self::Derived => {
                // US = X_perm * V_ref; s_hat from its column norms; dividing
                // by a zero s_hat deliberately yields non-finite vectors.
                let projected = matmul(permuted, &reference.v);
                let s = column_norms(&projected);

                let k = s.nrows();
                let mut u = projected;
                for j in 0..k {
                    for i in 0..u.nrows() {
                        u[(i, j)] /= s[j];
                    }
                }

                let mut v = transpose_matmul(permuted, &reference.u);
                for j in 0..k {
                    for i in 0..v.nrows() {
                        v[(i, j)] /= s[j];
                    }
                }

                Ok(Decomposition { u, s, v })
            }
        }
    }
}

/// Orthogonal rotation `Q` minimizing `|| V_hat * Q - V_ref ||_F`.
///
/// With `M = V_ref' * V_hat = U_bar * S_bar * V_bar'`, the minimizer is
/// `Q = V_bar * U_bar'`.
fn procrustes_rotation(v_ref: &Mat<f64>, v_hat: &Mat<f64>) -> PlsResult<Mat<f64>> {
    if v_hat.nrows() != v_ref.nrows() || v_hat.ncols() != v_ref.ncols() {
        return Err(PlsError::ComponentMismatch {
            expected: v_ref.ncols(),
            got: v_hat.ncols(),
        });
    }

    let m = transpose_matmul(v_ref, v_hat);
    let aligned = decompose::decompose(&m)?;
    Ok(matmul_transpose(&aligned.v, &aligned.u))
}

/// The resampled matrix must have the shape the reference was computed
/// from, otherwise accumulation against the reference is ill-defined.
fn ensure_compatible(permuted: &Mat<f64>, reference: &Decomposition) -> PlsResult<()> {
    let expected_rows = reference.u.nrows();
    let expected_cols = reference.v.nrows();
    if permuted.nrows() != expected_rows || permuted.ncols() != expected_cols {
        return Err(PlsError::ShapeMismatch {
            expected_rows,
            expected_cols,
            got_rows: permuted.nrows(),
            got_cols: permuted.ncols(),
        });
    }
    Ok(())
}
