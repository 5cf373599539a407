//! Nonparametric inference engines: permutation and bootstrap resample
//! tests over a reference singular value decomposition.
//!
//! The two engines share one rotation strategy (`RotationMethod`) so the
//! alignment variants cannot drift apart, and one resampler so paired X/Y
//! matrices always see the same row order.

mod bootstrap;
mod permutation;
mod resample_test;
mod rotation;

pub use bootstrap::bootstrap_test;
pub use permutation::permutation_test;
pub use resample_test::ResampleTest;
