//! Shared numeric utilities.

pub mod matrix;
pub mod stats;

pub use matrix::{
    center_columns, column_norms, frobenius_norm, matmul, matmul_transpose, transpose_matmul,
};
pub use stats::{quantile, standard_error_of_mean};
