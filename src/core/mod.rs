//! Core types for PLS resample analysis.

mod conditions;
mod options;
mod result;

pub use conditions::ConditionOrder;
pub use options::{OptionsError, ResampleOptions, ResampleOptionsBuilder, RotationMethod};
pub use result::{BootstrapResult, PermutationResult};
