//! Group and condition structure of the observation matrix.

use crate::errors::{PlsError, PlsResult};
use std::collections::BTreeMap;

/// Row-wise group and condition layout of a stacked observation matrix.
///
/// The matrix rows are partitioned into contiguous group blocks; within a
/// block, every row carries a condition label. This ordering is load-bearing:
/// all resampling operations must preserve the partition exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOrder {
    groups: Vec<Vec<usize>>,
}

impl ConditionOrder {
    /// Build a condition order from per-group label sequences.
    ///
    /// Each inner vector holds one condition label per row of that group's
    /// block, in row order.
    pub fn new(groups: Vec<Vec<usize>>) -> PlsResult<Self> {
        if groups.is_empty() || groups.iter().any(|g| g.is_empty()) {
            return Err(PlsError::EmptyConditionOrder);
        }
        Ok(Self { groups })
    }

    /// Generate the default layout for `group_sizes[i]` participants per
    /// group and `n_conditions` conditions: each group's block is the
    /// concatenation `[0; size], [1; size], ..`.
    pub fn generate(group_sizes: &[usize], n_conditions: usize) -> PlsResult<Self> {
        if group_sizes.is_empty()
            || n_conditions == 0
            || group_sizes.iter().any(|&size| size == 0)
        {
            return Err(PlsError::EmptyConditionOrder);
        }
        let groups = group_sizes
            .iter()
            .map(|&size| {
                let mut labels = Vec::with_capacity(size * n_conditions);
                for cond in 0..n_conditions {
                    labels.extend(std::iter::repeat(cond).take(size));
                }
                labels
            })
            .collect();
        Ok(Self { groups })
    }

    /// Number of groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Total number of rows across all group blocks.
    pub fn total_rows(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }

    /// The per-group label sequences.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Contiguous `(start, len)` span of each group block.
    pub fn group_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::with_capacity(self.groups.len());
        let mut start = 0;
        for group in &self.groups {
            spans.push((start, group.len()));
            start += group.len();
        }
        spans
    }

    /// Absolute row indices of every (group, condition) cell, groups in
    /// order, conditions in ascending label order within each group.
    pub fn condition_cells(&self) -> Vec<Vec<usize>> {
        self.cells_by_group().into_iter().flatten().collect()
    }

    /// Per-group (group, condition) cells: `result[g]` holds group g's
    /// cells in ascending label order, each a list of absolute row indices.
    pub fn cells_by_group(&self) -> Vec<Vec<Vec<usize>>> {
        let mut groups_cells = Vec::with_capacity(self.groups.len());
        let mut offset = 0;
        for group in &self.groups {
            let mut by_label: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
            for (row, &label) in group.iter().enumerate() {
                by_label.entry(label).or_default().push(offset + row);
            }
            groups_cells.push(by_label.into_values().collect());
            offset += group.len();
        }
        groups_cells
    }

    /// Check that this order describes exactly `n_rows` rows.
    pub fn validate_rows(&self, n_rows: usize) -> PlsResult<()> {
        let expected = self.total_rows();
        if expected != n_rows {
            return Err(PlsError::RowCountMismatch {
                expected,
                got: n_rows,
            });
        }
        Ok(())
    }
}
