//! Error types shared across the crate.

use crate::core::OptionsError;
use thiserror::Error;

/// Convenience alias used by all fallible operations in this crate.
pub type PlsResult<T> = Result<T, PlsError>;

/// Errors that can occur during PLS analysis and resample testing.
#[derive(Debug, Error)]
pub enum PlsError {
    #[error("rotation method {0} has not been implemented")]
    UnimplementedRotation(usize),

    #[error("{0} has not yet been implemented")]
    UnimplementedVariant(&'static str),

    #[error("multi-group analysis is not yet implemented (got {got} groups)")]
    UnimplementedMultiGroup { got: usize },

    #[error("invalid PLS variant key {0:?}")]
    InvalidVariantKey(String),

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("condition order is empty or contains an empty group")]
    EmptyConditionOrder,

    #[error("condition order describes {expected} rows but matrix has {got}")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("dimension mismatch: X has {x_rows} rows but Y has {y_rows}")]
    PairedRowMismatch { x_rows: usize, y_rows: usize },

    #[error(
        "component mismatch: resampled decomposition produced {got} components \
         but the reference has {expected}"
    )]
    ComponentMismatch { expected: usize, got: usize },

    #[error(
        "shape mismatch: resampled matrix is {got_rows}x{got_cols} but the \
         reference decomposition expects {expected_rows}x{expected_cols}"
    )]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("preprocessor does not support {0}")]
    UnsupportedPreprocess(&'static str),

    #[error("singular value decomposition did not converge")]
    DecompositionFailed,
}
