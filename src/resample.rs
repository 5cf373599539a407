//! Row resampling that respects group and condition structure.
//!
//! Two index generators drive the resample tests: a within-group
//! permutation (shuffling condition assignment, the null model of the
//! permutation test) and a within-cell draw with replacement (preserving
//! the design structure, the bootstrap model). The index vectors are shared
//! between paired X/Y matrices so row correspondence survives resampling.

use crate::core::ConditionOrder;
use crate::errors::PlsResult;
use faer::Mat;
use rand::seq::SliceRandom;
use rand::Rng;

/// Row indices for one permutation draw: each group block's rows are
/// shuffled in place, so rows never cross group boundaries.
pub fn permutation_indices<R: Rng>(cond_order: &ConditionOrder, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..cond_order.total_rows()).collect();
    for (start, len) in cond_order.group_spans() {
        indices[start..start + len].shuffle(rng);
    }
    indices
}

/// Row indices for one bootstrap draw: each (group, condition) cell is
/// redrawn with replacement from within itself.
pub fn bootstrap_indices<R: Rng>(cond_order: &ConditionOrder, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..cond_order.total_rows()).collect();
    for cell in cond_order.condition_cells() {
        for &row in &cell {
            indices[row] = cell[rng.gen_range(0..cell.len())];
        }
    }
    indices
}

/// Materialize a row-gathered copy of `m`: row i of the output is row
/// `indices[i]` of the input.
pub fn gather_rows(m: &Mat<f64>, indices: &[usize]) -> Mat<f64> {
    Mat::from_fn(indices.len(), m.ncols(), |i, j| m[(indices[i], j)])
}

/// Permute rows within each group block, without replacement.
///
/// The output holds the same multiset of rows as the input within every
/// group block, and the same row and column counts overall.
pub fn resample_without_replacement<R: Rng>(
    m: &Mat<f64>,
    cond_order: &ConditionOrder,
    rng: &mut R,
) -> PlsResult<Mat<f64>> {
    cond_order.validate_rows(m.nrows())?;
    let indices = permutation_indices(cond_order, rng);
    Ok(gather_rows(m, &indices))
}

/// Sample rows with replacement within each (group, condition) cell.
///
/// Preserves row and column counts per group block.
pub fn resample_with_replacement<R: Rng>(
    m: &Mat<f64>,
    cond_order: &ConditionOrder,
    rng: &mut R,
) -> PlsResult<Mat<f64>> {
    cond_order.validate_rows(m.nrows())?;
    let indices = bootstrap_indices(cond_order, rng);
    Ok(gather_rows(m, &indices))
}
