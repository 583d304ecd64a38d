//! Errors for the robust regression layer (configuration checks, data
//! validation, model state, and optimizer failures).
//!
//! This module defines [`RegressionError`] and the [`RegressionResult`] alias
//! used by the feature transformer, loss functions, trimmed estimator,
//! preprocessors and the [`TrimmedRegressor`](crate::regression::models::TrimmedRegressor).
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Configuration errors are raised eagerly, either when an options/loss
//!   value is constructed or at the top of `fit` when the sample count is
//!   first known.
//! - Optimizer/backend errors are wrapped in [`RegressionError::Optimization`]
//!   without losing the underlying [`OptError`].
use crate::optimization::errors::OptError;

/// Result alias for regression operations that may produce [`RegressionError`].
pub type RegressionResult<T> = Result<T, RegressionError>;

/// Unified error type for the regression layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    // ---- Configuration ----
    /// Contamination fraction ε must lie in [0, 0.5).
    InvalidContamination { value: f64, reason: &'static str },

    /// Huber δ must be finite and > 0.
    InvalidHuberDelta { value: f64, reason: &'static str },

    /// Batch size may not exceed the number of training samples.
    BatchSizeExceedsSamples { batch_size: usize, n_samples: usize },

    /// Trim count k = floor(ε·B) must be strictly below the batch size.
    InvalidTrimCount { trim: usize, batch_size: usize },

    /// Raw inputs must have at least one coordinate.
    ZeroArity,

    // ---- Data validation ----
    /// No samples were supplied.
    EmptySample,

    /// Number of inputs and targets differ.
    LengthMismatch { inputs: usize, targets: usize },

    /// An input coordinate is NaN/±inf.
    NonFiniteInput { row: usize, col: usize, value: f64 },

    /// A target is NaN/±inf.
    NonFiniteTarget { index: usize, value: f64 },

    /// Raw input arity does not match the transformer.
    InputArityMismatch { expected: usize, found: usize },

    // ---- Preprocessors ----
    /// Kernel size must be finite and > 0.
    InvalidKernelSize { value: f64, reason: &'static str },

    /// Kernel stride must be finite and > 0.
    InvalidStride { value: f64, reason: &'static str },

    /// Kernel threshold must lie in [0, 1].
    InvalidThreshold { value: f64, reason: &'static str },

    /// DBSCAN neighborhood radius must be finite and > 0.
    InvalidClusterRadius { value: f64, reason: &'static str },

    /// DBSCAN core points need at least one neighbor (themselves).
    InvalidMinSamples { min_samples: usize, reason: &'static str },

    // ---- Model state ----
    /// `predict` (or an accessor) was called before a completed `fit`.
    ModelNotFitted,

    // ---- Optimizer ----
    /// Error raised by the optimization layer.
    Optimization(OptError),
}

impl std::error::Error for RegressionError {}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            RegressionError::InvalidContamination { value, reason } => {
                write!(f, "Invalid contamination fraction {value}: {reason}")
            }
            RegressionError::InvalidHuberDelta { value, reason } => {
                write!(f, "Invalid Huber delta {value}: {reason}")
            }
            RegressionError::BatchSizeExceedsSamples { batch_size, n_samples } => {
                write!(f, "Batch size {batch_size} exceeds the number of samples {n_samples}")
            }
            RegressionError::InvalidTrimCount { trim, batch_size } => {
                write!(
                    f,
                    "Trim count {trim} leaves no samples in a batch of size {batch_size}"
                )
            }
            RegressionError::ZeroArity => {
                write!(f, "Raw inputs must have at least one coordinate")
            }

            // ---- Data validation ----
            RegressionError::EmptySample => write!(f, "No samples supplied"),
            RegressionError::LengthMismatch { inputs, targets } => {
                write!(f, "Got {inputs} inputs but {targets} targets")
            }
            RegressionError::NonFiniteInput { row, col, value } => {
                write!(f, "Non-finite input at row {row}, column {col}: {value}")
            }
            RegressionError::NonFiniteTarget { index, value } => {
                write!(f, "Non-finite target at index {index}: {value}")
            }
            RegressionError::InputArityMismatch { expected, found } => {
                write!(f, "Input arity mismatch: expected {expected}, found {found}")
            }

            // ---- Preprocessors ----
            RegressionError::InvalidKernelSize { value, reason } => {
                write!(f, "Invalid kernel size {value}: {reason}")
            }
            RegressionError::InvalidStride { value, reason } => {
                write!(f, "Invalid kernel stride {value}: {reason}")
            }
            RegressionError::InvalidThreshold { value, reason } => {
                write!(f, "Invalid kernel threshold {value}: {reason}")
            }
            RegressionError::InvalidClusterRadius { value, reason } => {
                write!(f, "Invalid clustering radius {value}: {reason}")
            }
            RegressionError::InvalidMinSamples { min_samples, reason } => {
                write!(f, "Invalid minimum cluster size {min_samples}: {reason}")
            }

            // ---- Model state ----
            RegressionError::ModelNotFitted => {
                write!(f, "Model has not been fitted; call fit before predict")
            }

            // ---- Optimizer ----
            RegressionError::Optimization(err) => write!(f, "Optimization failed: {err}"),
        }
    }
}

impl From<OptError> for RegressionError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::BatchSizeExceedsSamples { batch_size, n_samples } => {
                RegressionError::BatchSizeExceedsSamples { batch_size, n_samples }
            }
            OptError::InvalidTrimCount { trim, batch_size } => {
                RegressionError::InvalidTrimCount { trim, batch_size }
            }
            other => RegressionError::Optimization(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Configuration errors that both layers know about keep their shape when
    // crossing from the optimizer back into the regression layer.
    fn opt_errors_map_back_to_configuration_variants() {
        let err = OptError::BatchSizeExceedsSamples { batch_size: 10, n_samples: 3 };

        assert_eq!(
            RegressionError::from(err),
            RegressionError::BatchSizeExceedsSamples { batch_size: 10, n_samples: 3 }
        );
    }

    #[test]
    fn other_opt_errors_are_wrapped() {
        let err = OptError::MissingWeights;

        let mapped = RegressionError::from(err.clone());

        assert_eq!(mapped, RegressionError::Optimization(err));
        assert!(mapped.to_string().starts_with("Optimization failed"));
    }

    #[test]
    fn round_trip_through_opt_error_preserves_trim_count() {
        let original = RegressionError::InvalidTrimCount { trim: 5, batch_size: 5 };

        let back = RegressionError::from(OptError::from(original.clone()));

        assert_eq!(back, original);
    }
}
