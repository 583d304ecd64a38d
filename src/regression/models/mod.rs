//! models — user-facing robust regression models.
//!
//! Purpose
//! -------
//! Expose [`TrimmedRegressor`], which wires the feature transformer and the
//! trimmed gradient estimator from `regression::core` into the mini-batch
//! optimizer from `optimization::mbgd`.
//!
//! Downstream usage
//! ----------------
//! - Build [`RegressionOptions`](crate::regression::core::RegressionOptions),
//!   construct a model with `TrimmedRegressor::new`, then `fit(&data)`.
//! - After a fit, use `predict`, `predict_scalar` or `predict_batch`; inspect
//!   `weights()` and the fit summary in `results`.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`trimmed`] cover the fitted / unfitted lifecycle, eager
//!   configuration errors and prediction consistency.
//! - The integration suite covers the robustness and equivalence properties
//!   on synthetic data.

pub mod trimmed;

pub use self::trimmed::TrimmedRegressor;

pub mod prelude {
    pub use super::trimmed::TrimmedRegressor;
}
