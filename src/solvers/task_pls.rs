//! Mean-Centered Task PLS driver.
//!
//! Single-group task PLS: mean-center the observation matrix, decompose it,
//! compute the latent variables, and run the resample tests against the
//! resulting reference decomposition.

use crate::core::{ConditionOrder, ResampleOptions};
use crate::decompose::{decompose, Decomposition};
use crate::errors::{PlsError, PlsResult};
use crate::inference::ResampleTest;
use crate::preprocess::{MeanCenter, Preprocess};
use crate::solvers::{PlsModel, PlsVariant};
use crate::utils::matmul;
use faer::Mat;

/// Mean-Centered Task PLS estimator.
///
/// # Example
///
/// ```rust,ignore
/// use neuropls::prelude::*;
/// use faer::Mat;
///
/// let x = Mat::from_fn(6, 10, |i, j| (i + j) as f64);
///
/// let fitted = TaskPls::builder()
///     .group_sizes(vec![2])
///     .n_conditions(3)
///     .resample_options(ResampleOptions::builder().seed(42).build()?)
///     .build()?
///     .fit(&x, None)?;
///
/// println!("singular values: {:?}", fitted.decomposition().s);
/// ```
#[derive(Debug, Clone)]
pub struct TaskPls {
    group_sizes: Vec<usize>,
    n_conditions: usize,
    cond_order: Option<ConditionOrder>,
    resample_options: Option<ResampleOptions>,
}

impl TaskPls {
    /// Create a builder for configuring the driver.
    pub fn builder() -> TaskPlsBuilder {
        TaskPlsBuilder::default()
    }

    fn resolve_cond_order(&self) -> PlsResult<ConditionOrder> {
        match &self.cond_order {
            Some(order) => Ok(order.clone()),
            None => ConditionOrder::generate(&self.group_sizes, self.n_conditions),
        }
    }
}

impl PlsModel for TaskPls {
    type Fitted = FittedTaskPls;

    fn fit(&self, x: &Mat<f64>, y: Option<&Mat<f64>>) -> PlsResult<Self::Fitted> {
        if y.is_some() {
            return Err(PlsError::UnsupportedPreprocess(
                "a behavioral block (task PLS takes X only)",
            ));
        }

        let cond_order = self.resolve_cond_order()?;
        cond_order.validate_rows(x.nrows())?;

        let preprocess = MeanCenter;
        let condition_means = preprocess.condition_means(x, &cond_order)?;
        let x_mc = preprocess.apply(x, None, &cond_order)?;

        let decomposition = decompose(&x_mc)?;
        let x_latent = matmul(&x_mc, &decomposition.v);

        let resample = match &self.resample_options {
            Some(options) => Some(ResampleTest::run(
                x,
                None,
                &decomposition,
                &cond_order,
                &preprocess,
                options,
            )?),
            None => None,
        };

        Ok(FittedTaskPls {
            cond_order,
            condition_means,
            x_mc,
            decomposition,
            x_latent,
            resample,
        })
    }
}

/// A fitted Mean-Centered Task PLS model.
#[derive(Debug, Clone)]
pub struct FittedTaskPls {
    /// Condition layout the model was fit under.
    cond_order: ConditionOrder,
    /// Raw column means of every (group, condition) cell, one row per cell.
    condition_means: Mat<f64>,
    /// Group-centered cell means normalized by their Frobenius norm; the
    /// matrix that was decomposed.
    x_mc: Mat<f64>,
    /// Reference decomposition of `x_mc`.
    decomposition: Decomposition,
    /// Latent variables: `x_mc * V`.
    x_latent: Mat<f64>,
    /// Resample test results, when tests were requested.
    resample: Option<ResampleTest>,
}

impl FittedTaskPls {
    /// The condition layout used for fitting and resampling.
    pub fn cond_order(&self) -> &ConditionOrder {
        &self.cond_order
    }

    /// The raw (group, condition) cell means.
    pub fn condition_means(&self) -> &Mat<f64> {
        &self.condition_means
    }

    /// The normalized, centered matrix the decomposition was computed from.
    pub fn x_mc(&self) -> &Mat<f64> {
        &self.x_mc
    }

    /// The reference decomposition.
    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    /// Latent variables of the input (`x_mc * V`).
    pub fn x_latent(&self) -> &Mat<f64> {
        &self.x_latent
    }

    /// Resample test results, if tests were run.
    pub fn resample(&self) -> Option<&ResampleTest> {
        self.resample.as_ref()
    }
}

/// Builder for `TaskPls`.
#[derive(Debug, Clone)]
pub struct TaskPlsBuilder {
    variant: PlsVariant,
    group_sizes: Vec<usize>,
    n_conditions: usize,
    cond_order: Option<ConditionOrder>,
    resample_options: Option<ResampleOptions>,
}

impl Default for TaskPlsBuilder {
    fn default() -> Self {
        Self {
            variant: PlsVariant::MeanCenteredTask,
            group_sizes: Vec::new(),
            n_conditions: 0,
            cond_order: None,
            resample_options: Some(ResampleOptions::default()),
        }
    }
}

impl TaskPlsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PLS variant. Defaults to Mean-Centered Task PLS; variants
    /// without a driver are rejected at `build()`.
    pub fn variant(mut self, variant: PlsVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the number of participants per group.
    pub fn group_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.group_sizes = sizes;
        self
    }

    /// Set the number of conditions per group.
    pub fn n_conditions(mut self, n: usize) -> Self {
        self.n_conditions = n;
        self
    }

    /// Override the generated condition layout with an explicit one.
    pub fn cond_order(mut self, order: ConditionOrder) -> Self {
        self.cond_order = Some(order);
        self
    }

    /// Configure the resample tests. Defaults to standard options.
    pub fn resample_options(mut self, options: ResampleOptions) -> Self {
        self.resample_options = Some(options);
        self
    }

    /// Skip the resample tests entirely.
    pub fn without_resampling(mut self) -> Self {
        self.resample_options = None;
        self
    }

    /// Build the driver, rejecting configurations without an
    /// implementation.
    pub fn build(self) -> PlsResult<TaskPls> {
        if !self.variant.is_implemented() {
            return Err(PlsError::UnimplementedVariant(self.variant.full_name()));
        }
        let n_groups = match &self.cond_order {
            Some(order) => order.num_groups(),
            None => self.group_sizes.len(),
        };
        if n_groups > 1 {
            return Err(PlsError::UnimplementedMultiGroup { got: n_groups });
        }
        if let Some(options) = &self.resample_options {
            options.validate()?;
        }
        Ok(TaskPls {
            group_sizes: self.group_sizes,
            n_conditions: self.n_conditions,
            cond_order: self.cond_order,
            resample_options: self.resample_options,
        })
    }
}
