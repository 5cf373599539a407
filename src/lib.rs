//! Partial Least Squares analysis for neuroimaging/behavioral data, with
//! nonparametric inference via permutation and bootstrap resampling.
//!
//! The centerpiece is the resample test: given a reference singular value
//! decomposition of the (preprocessed) observation matrix, the permutation
//! engine estimates how often chance reproduces its singular values, and the
//! bootstrap engine estimates confidence intervals and stability ratios for
//! its singular vectors.
//!
//! # Example
//!
//! ```rust,ignore
//! use neuropls::prelude::*;
//! use faer::Mat;
//!
//! // 2 participants x 3 conditions, 10 measured variables
//! let x = Mat::from_fn(6, 10, |i, j| ((i * 10 + j) as f64).sin());
//!
//! let fitted = TaskPls::builder()
//!     .group_sizes(vec![2])
//!     .n_conditions(3)
//!     .resample_options(
//!         ResampleOptions::builder()
//!             .n_permutations(500)
//!             .n_bootstraps(500)
//!             .seed(42)
//!             .build()?,
//!     )
//!     .build()?
//!     .fit(&x, None)?;
//!
//! let tests = fitted.resample().unwrap();
//! println!("{tests}");
//! ```

pub mod core;
pub mod decompose;
pub mod errors;
pub mod inference;
pub mod preprocess;
pub mod resample;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        BootstrapResult, ConditionOrder, OptionsError, PermutationResult, ResampleOptions,
        ResampleOptionsBuilder, RotationMethod,
    };
    pub use crate::decompose::{decompose, Decomposition};
    pub use crate::errors::{PlsError, PlsResult};
    pub use crate::inference::{bootstrap_test, permutation_test, ResampleTest};
    pub use crate::preprocess::{CrossBlockCorrelation, MeanCenter, Preprocess};
    pub use crate::resample::{resample_with_replacement, resample_without_replacement};
    pub use crate::solvers::{FittedTaskPls, PlsModel, PlsVariant, TaskPls, TaskPlsBuilder};
}

pub use crate::core::{
    BootstrapResult, ConditionOrder, OptionsError, PermutationResult, ResampleOptions,
    ResampleOptionsBuilder, RotationMethod,
};
pub use crate::decompose::{decompose, Decomposition};
pub use crate::errors::{PlsError, PlsResult};
pub use crate::inference::ResampleTest;
pub use crate::solvers::{FittedTaskPls, PlsModel, PlsVariant, TaskPls};
