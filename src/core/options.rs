//! Resample test options and configuration.

use crate::errors::{PlsError, PlsResult};
use thiserror::Error;

/// Strategy used to align each resampled decomposition with the reference
/// solution before accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMethod {
    /// Plain decomposition of the resampled matrix (default).
    #[default]
    Unrotated,
    /// Decompose, then apply the orthogonal Procrustes rotation that best
    /// aligns the resampled right singular vectors onto the reference.
    Procrustes,
    /// Derive singular values and vectors directly from projections onto
    /// the reference basis, without a fresh decomposition.
    Derived,
}

impl RotationMethod {
    /// Map a numeric rotation code (0, 1, 2) to a method.
    ///
    /// Any other code fails before any resampling state is touched.
    pub fn from_code(code: usize) -> PlsResult<Self> {
        match code {
            0 => Ok(Self::Unrotated),
            1 => Ok(Self::Procrustes),
            2 => Ok(Self::Derived),
            other => Err(PlsError::UnimplementedRotation(other)),
        }
    }

    /// The numeric code for this method.
    pub fn code(&self) -> usize {
        match self {
            Self::Unrotated => 0,
            Self::Procrustes => 1,
            Self::Derived => 2,
        }
    }
}

/// Configuration options for the permutation and bootstrap tests.
#[derive(Debug, Clone)]
pub struct ResampleOptions {
    /// Number of permutation iterations (default: 1000).
    pub n_permutations: usize,
    /// Number of bootstrap iterations (default: 1000).
    pub n_bootstraps: usize,
    /// Quantile pair used for the bootstrap confidence interval
    /// (default: (0.05, 0.95)). Equal bounds give a degenerate interval.
    pub confidence_bounds: (f64, f64),
    /// Rotation strategy applied to each resampled decomposition.
    pub rotation: RotationMethod,
    /// RNG seed. `None` seeds from entropy; set for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        Self {
            n_permutations: 1000,
            n_bootstraps: 1000,
            confidence_bounds: (0.05, 0.95),
            rotation: RotationMethod::Unrotated,
            seed: None,
        }
    }
}

/// Errors that can occur when validating resample options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("number of permutations must be at least 1, got {0}")]
    InvalidPermutations(usize),
    #[error("number of bootstrap iterations must be at least 1, got {0}")]
    InvalidBootstraps(usize),
    #[error("confidence bounds must satisfy 0 <= lower <= upper <= 1, got ({0}, {1})")]
    InvalidConfidenceBounds(f64, f64),
}

impl ResampleOptions {
    /// Create a new builder with default options.
    pub fn builder() -> ResampleOptionsBuilder {
        ResampleOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.n_permutations < 1 {
            return Err(OptionsError::InvalidPermutations(self.n_permutations));
        }
        if self.n_bootstraps < 1 {
            return Err(OptionsError::InvalidBootstraps(self.n_bootstraps));
        }
        let (lower, upper) = self.confidence_bounds;
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) || lower > upper {
            return Err(OptionsError::InvalidConfidenceBounds(lower, upper));
        }
        Ok(())
    }
}

/// Builder for `ResampleOptions`.
#[derive(Debug, Clone, Default)]
pub struct ResampleOptionsBuilder {
    options: ResampleOptions,
}

impl ResampleOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of permutation iterations.
    pub fn n_permutations(mut self, n: usize) -> Self {
        self.options.n_permutations = n;
        self
    }

    /// Set the number of bootstrap iterations.
    pub fn n_bootstraps(mut self, n: usize) -> Self {
        self.options.n_bootstraps = n;
        self
    }

    /// Set the quantile pair for the bootstrap confidence interval.
    pub fn confidence_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.options.confidence_bounds = (lower, upper);
        self
    }

    /// Set the rotation strategy.
    pub fn rotation(mut self, rotation: RotationMethod) -> Self {
        self.options.rotation = rotation;
        self
    }

    /// Set the RNG seed for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<ResampleOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> ResampleOptions {
        self.options
    }
}
