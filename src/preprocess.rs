//! Preprocessing applied before decomposition.
//!
//! The engines are generic over a `Preprocess` implementation so that the
//! resampled matrices go through exactly the same transform that produced
//! the reference decomposition. Both transforms here collapse the
//! observation rows into one row per (group, condition) cell; that is what
//! makes the permutation null non-degenerate, since plain singular values
//! are invariant under any row permutation of the full matrix.

use crate::core::ConditionOrder;
use crate::errors::{PlsError, PlsResult};
use crate::utils::{center_columns, frobenius_norm};
use faer::Mat;

/// A transform taking the (resampled) observation matrix, and optionally a
/// paired behavioral matrix, to the matrix that gets decomposed.
pub trait Preprocess {
    /// Apply the transform. `y` carries the behavioral block when the PLS
    /// variant uses one; implementations reject the combination they do
    /// not support.
    fn apply(
        &self,
        x: &Mat<f64>,
        y: Option<&Mat<f64>>,
        cond_order: &ConditionOrder,
    ) -> PlsResult<Mat<f64>>;
}

/// Task PLS preprocessing: collapse each (group, condition) cell to its
/// column means, center the cell-mean rows within each group, and normalize
/// the result by its Frobenius norm.
///
/// A zero centered matrix normalizes to NaN entries; that degeneracy flows
/// through to the decomposition rather than being masked here.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanCenter;

impl MeanCenter {
    /// Column means of every (group, condition) cell, one row per cell,
    /// groups stacked in order with conditions ascending within a group.
    pub fn condition_means(
        &self,
        x: &Mat<f64>,
        cond_order: &ConditionOrder,
    ) -> PlsResult<Mat<f64>> {
        cond_order.validate_rows(x.nrows())?;

        let p = x.ncols();
        let cells = cond_order.condition_cells();
        let mut means = Mat::zeros(cells.len(), p);
        for (row, cell) in cells.iter().enumerate() {
            for j in 0..p {
                means[(row, j)] =
                    cell.iter().map(|&r| x[(r, j)]).sum::<f64>() / cell.len() as f64;
            }
        }
        Ok(means)
    }

    /// Cell means with each group's column means removed: the deviation of
    /// every condition from its group's average profile.
    pub fn centered(&self, x: &Mat<f64>, cond_order: &ConditionOrder) -> PlsResult<Mat<f64>> {
        let mut means = self.condition_means(x, cond_order)?;

        let p = means.ncols();
        let mut row = 0;
        for group_cells in cond_order.cells_by_group() {
            let len = group_cells.len();
            for j in 0..p {
                let group_mean: f64 =
                    (row..row + len).map(|i| means[(i, j)]).sum::<f64>() / len as f64;
                for i in row..row + len {
                    means[(i, j)] -= group_mean;
                }
            }
            row += len;
        }
        Ok(means)
    }
}

impl Preprocess for MeanCenter {
    fn apply(
        &self,
        x: &Mat<f64>,
        y: Option<&Mat<f64>>,
        cond_order: &ConditionOrder,
    ) -> PlsResult<Mat<f64>> {
        if y.is_some() {
            return Err(PlsError::UnsupportedPreprocess(
                "a behavioral block (mean-centering is X-only)",
            ));
        }

        let mut centered = self.centered(x, cond_order)?;
        let norm = frobenius_norm(&centered);
        for j in 0..centered.ncols() {
            for i in 0..centered.nrows() {
                centered[(i, j)] /= norm;
            }
        }
        Ok(centered)
    }
}

/// Behavioral PLS preprocessing: for each (group, condition) cell, the
/// Pearson correlation matrix between the behavioral columns and the
/// observation columns, cells stacked vertically.
///
/// Zero-variance columns within a cell produce non-finite correlations,
/// which flow through as data.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossBlockCorrelation;

impl CrossBlockCorrelation {
    fn cell_block(x_cell: &Mat<f64>, y_cell: &Mat<f64>) -> Mat<f64> {
        let n = x_cell.nrows();
        let (x_centered, _) = center_columns(x_cell);
        let (y_centered, _) = center_columns(y_cell);

        let mut x_scale = vec![0.0; x_centered.ncols()];
        for (j, scale) in x_scale.iter_mut().enumerate() {
            *scale = (0..n)
                .map(|i| x_centered[(i, j)].powi(2))
                .sum::<f64>()
                .sqrt();
        }
        let mut y_scale = vec![0.0; y_centered.ncols()];
        for (j, scale) in y_scale.iter_mut().enumerate() {
            *scale = (0..n)
                .map(|i| y_centered[(i, j)].powi(2))
                .sum::<f64>()
                .sqrt();
        }

        Mat::from_fn(y_centered.ncols(), x_centered.ncols(), |b, j| {
            let mut dot = 0.0;
            for i in 0..n {
                dot += y_centered[(i, b)] * x_centered[(i, j)];
            }
            dot / (y_scale[b] * x_scale[j])
        })
    }
}

impl Preprocess for CrossBlockCorrelation {
    fn apply(
        &self,
        x: &Mat<f64>,
        y: Option<&Mat<f64>>,
        cond_order: &ConditionOrder,
    ) -> PlsResult<Mat<f64>> {
        let y = y.ok_or(PlsError::UnsupportedPreprocess(
            "a missing behavioral block (cross-block correlation needs Y)",
        ))?;

        cond_order.validate_rows(x.nrows())?;
        if y.nrows() != x.nrows() {
            return Err(PlsError::PairedRowMismatch {
                x_rows: x.nrows(),
                y_rows: y.nrows(),
            });
        }

        let cells = cond_order.condition_cells();
        let b = y.ncols();
        let p = x.ncols();
        let mut stacked = Mat::zeros(cells.len() * b, p);

        for (c, cell) in cells.iter().enumerate() {
            if cell.len() < 2 {
                return Err(PlsError::InsufficientObservations {
                    needed: 2,
                    got: cell.len(),
                });
            }
            let x_cell = Mat::from_fn(cell.len(), p, |i, j| x[(cell[i], j)]);
            let y_cell = Mat::from_fn(cell.len(), b, |i, j| y[(cell[i], j)]);
            let block = Self::cell_block(&x_cell, &y_cell);
            for i in 0..b {
                for j in 0..p {
                    stacked[(c * b + i, j)] = block[(i, j)];
                }
            }
        }
        Ok(stacked)
    }
}
