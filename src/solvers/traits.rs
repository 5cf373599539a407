//! Core trait for PLS drivers.

use crate::errors::PlsResult;
use faer::Mat;

/// A PLS variant that can be fit to data.
///
/// Fitting consumes the raw observation matrix (and optionally a paired
/// behavioral block) and returns a fitted model holding the reference
/// decomposition and resample test results.
pub trait PlsModel {
    /// The type of the fitted model.
    type Fitted;

    /// Fit the model.
    ///
    /// # Arguments
    /// * `x` - Observation matrix, rows stacked by group and condition
    /// * `y` - Optional behavioral block with the same row layout
    fn fit(&self, x: &Mat<f64>, y: Option<&Mat<f64>>) -> PlsResult<Self::Fitted>;
}
