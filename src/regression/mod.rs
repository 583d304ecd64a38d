//! regression — robust polynomial regression via trimmed mini-batch descent.
//!
//! Purpose
//! -------
//! Fit polynomial models to data in which an unknown fraction of samples may
//! be corrupted. Every optimizer step ranks the sampled batch by loss and
//! drops the worst `floor(ε·B)` members before averaging the gradient.
//!
//! Key behaviors
//! -------------
//! - [`core`]: data containers, polynomial features, loss kinds, the trimmed
//!   estimator, options and preprocessors.
//! - [`models`]: the [`TrimmedRegressor`] fit / predict surface.
//! - [`errors`]: [`RegressionError`] and the [`RegressionResult`] alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - ε ∈ [0, 0.5) and `1 ≤ B ≤ N`, hence `0 ≤ floor(ε·B) < B`: at least one
//!   sample always contributes to a step.
//! - With ε = 0 the fit performs exactly the arithmetic of plain mini-batch
//!   gradient descent for the same batch sequence.
//! - Reaching `max_iter` is a valid outcome (`FitState::MaxIterReached`).
//!
//! Conventions
//! -----------
//! - `residual = prediction − target`.
//! - Weights are ordered like the features: bias first, then monomials by
//!   increasing total degree.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ClusteringPreprocessor, LossKind, MeanKernelPreprocessor, NullPreprocessor,
    PolynomialFeatures, Preprocessor, RegressionData, RegressionOptions,
};
pub use self::errors::{RegressionError, RegressionResult};
pub use self::models::TrimmedRegressor;

pub mod prelude {
    pub use super::core::{LossKind, RegressionData, RegressionOptions};
    pub use super::errors::{RegressionError, RegressionResult};
    pub use super::models::prelude::*;
}
