//! PLS variant drivers.

mod task_pls;
mod traits;

pub use task_pls::{FittedTaskPls, TaskPls, TaskPlsBuilder};
pub use traits::PlsModel;

use crate::errors::{PlsError, PlsResult};

/// The PLS variants this crate knows about.
///
/// Only `MeanCenteredTask` has a driver today; the rest are recognized so
/// that requesting one fails with a typed error at construction time
/// instead of an unknown-key error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlsVariant {
    /// Mean-Centering Task PLS.
    MeanCenteredTask,
    /// Non-Rotated Task PLS.
    NonRotatedTask,
    /// Regular Behavioral PLS.
    RegularBehavioral,
    /// Multiblock PLS.
    Multiblock,
    /// Non-Rotated Behavioral PLS.
    NonRotatedBehavioral,
    /// Non-Rotated Multiblock PLS.
    NonRotatedMultiblock,
}

impl PlsVariant {
    /// Resolve an abbreviated variant key.
    pub fn from_key(key: &str) -> PlsResult<Self> {
        match key {
            "mct" => Ok(Self::MeanCenteredTask),
            "nrt" => Ok(Self::NonRotatedTask),
            "rb" => Ok(Self::RegularBehavioral),
            "mb" => Ok(Self::Multiblock),
            "nrb" => Ok(Self::NonRotatedBehavioral),
            "nrmb" => Ok(Self::NonRotatedMultiblock),
            other => Err(PlsError::InvalidVariantKey(other.to_string())),
        }
    }

    /// Full human-readable variant name.
    pub fn full_name(&self) -> &'static str {
        match self {
            Self::MeanCenteredTask => "Mean-Centering Task PLS",
            Self::NonRotatedTask => "Non-Rotated Task PLS",
            Self::RegularBehavioral => "Regular Behavioral PLS",
            Self::Multiblock => "Multiblock PLS",
            Self::NonRotatedBehavioral => "Non-Rotated Behavioral PLS",
            Self::NonRotatedMultiblock => "Non-Rotated Multiblock PLS",
        }
    }

    /// Whether a driver exists for this variant.
    pub fn is_implemented(&self) -> bool {
        matches!(self, Self::MeanCenteredTask)
    }
}
