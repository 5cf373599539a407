//! Singular value decomposition oracle.
//!
//! Thin wrapper over faer's SVD that the engines treat as a black box:
//! `decompose` returns orthonormal-column factors with singular values in
//! descending order, tolerating rectangular input.

use crate::errors::{PlsError, PlsResult};
use faer::{Col, Mat};

/// Thin singular value decomposition `X = U * diag(s) * V'`.
///
/// `u` is n x k, `s` has length k, `v` is p x k, with k = min(n, p) and
/// `s` in descending order.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Left singular vectors.
    pub u: Mat<f64>,
    /// Singular values, descending.
    pub s: Col<f64>,
    /// Right singular vectors.
    pub v: Mat<f64>,
}

impl Decomposition {
    /// Number of components carried by this decomposition.
    pub fn n_components(&self) -> usize {
        self.s.nrows()
    }
}

/// Decompose a matrix, keeping the thin factors.
pub fn decompose(x: &Mat<f64>) -> PlsResult<Decomposition> {
    let n = x.nrows();
    let p = x.ncols();
    let k = n.min(p);
    if k == 0 {
        return Err(PlsError::InsufficientObservations { needed: 1, got: 0 });
    }

    let svd = x.svd().map_err(|_| PlsError::DecompositionFailed)?;
    let u_full = svd.U();
    let v_full = svd.V();
    let s_diag = svd.S();

    let u = Mat::from_fn(n, k, |i, j| u_full[(i, j)]);
    let v = Mat::from_fn(p, k, |i, j| v_full[(i, j)]);
    let s = Col::from_fn(k, |i| s_diag[i]);

    Ok(Decomposition { u, s, v })
}

/// Singular values only, descending.
pub fn singular_values(x: &Mat<f64>) -> PlsResult<Col<f64>> {
    let n = x.nrows();
    let p = x.ncols();
    let k = n.min(p);
    if k == 0 {
        return Err(PlsError::InsufficientObservations { needed: 1, got: 0 });
    }

    let svd = x.svd().map_err(|_| PlsError::DecompositionFailed)?;
    let s_diag = svd.S();
    Ok(Col::from_fn(k, |i| s_diag[i]))
}
