//! core — building blocks for trimmed polynomial regression.
//!
//! Purpose
//! -------
//! Collect the pieces the regression model is assembled from: validated
//! sample containers, the polynomial feature transformer, per-sample loss
//! kinds, the trimmed gradient estimator, model options, and optional
//! preprocessors.
//!
//! Key behaviors
//! -------------
//! - [`data`]: [`RegressionData`] with finiteness / shape validation.
//! - [`features`]: [`PolynomialFeatures`] (bias-first monomial basis).
//! - [`loss`]: [`LossKind`] (squared, Huber) with analytic derivatives.
//! - [`trim`]: [`trim_count`], [`trimmed_gradient`], [`trimmed_loss`].
//! - [`options`]: [`RegressionOptions`] and ε validation.
//! - [`preprocess`]: [`Preprocessor`] plus the null, mean-kernel and DBSCAN
//!   variants.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; rows of the design matrix follow sample order.
//! - The module performs no I/O and no logging.

pub mod data;
pub mod features;
pub mod loss;
pub mod options;
pub mod preprocess;
pub mod trim;

pub use self::data::RegressionData;
pub use self::features::PolynomialFeatures;
pub use self::loss::LossKind;
pub use self::options::{verify_contamination, RegressionOptions};
pub use self::preprocess::{
    ClusteringPreprocessor, MeanKernelPreprocessor, NullPreprocessor, Preprocessor,
};
pub use self::trim::{trim_count, trimmed_gradient, trimmed_loss};
