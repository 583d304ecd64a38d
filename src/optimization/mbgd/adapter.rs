//! Bridge from a [`BatchObjective`] to Argmin's problem interface.
//!
//! The executor owns the problem value; the adapter only borrows the
//! objective. Its `CostFunction` impl evaluates the full-data objective and
//! is used for diagnostics, while batch gradients are pulled by the solver
//! through [`ArgMinAdapter::batch_gradient`].
use crate::optimization::{
    errors::OptError,
    mbgd::{
        traits::{BatchEstimate, BatchObjective},
        types::{Cost, Weights},
    },
};
use argmin::core::{CostFunction, Error};

#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: BatchObjective> {
    pub f: &'a F,
}

impl<'a, F: BatchObjective> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }

    /// Gradient estimate over `batch`, converted to an Argmin error on failure.
    pub fn batch_gradient(
        &self, weights: &Weights, batch: &[usize],
    ) -> Result<BatchEstimate, Error> {
        Ok(self.f.batch_gradient(weights, batch)?)
    }
}

impl<'a, F: BatchObjective> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Weights;
    type Output = Cost;

    /// Evaluate the full-data objective and check that it is finite.
    ///
    /// # Errors
    /// Propagates any `OptError` from the objective; returns `NonFiniteCost`
    /// for `NaN`/`±∞`.
    fn cost(&self, weights: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(weights)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}
