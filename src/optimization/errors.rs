use argmin::core::{ArgminError, Error};

use crate::regression::errors::RegressionError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- MBGDOptions ----
    /// Learning rate needs to be positive and finite.
    InvalidLearningRate {
        value: f64,
        reason: &'static str,
    },
    /// Batch size needs to be positive.
    InvalidBatchSize {
        batch_size: usize,
        reason: &'static str,
    },
    /// Batch size cannot exceed the number of samples.
    BatchSizeExceedsSamples {
        batch_size: usize,
        n_samples: usize,
    },
    /// Step tolerance needs to be non-negative and finite.
    InvalidTolStep {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Random initialization scale needs to be positive and finite.
    InvalidInitScale {
        scale: f64,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Weights ----
    /// Weight vector does not match the objective dimension.
    WeightDimMismatch {
        expected: usize,
        found: usize,
    },
    /// Weights must be finite.
    InvalidWeights {
        index: usize,
        value: f64,
        reason: &'static str,
    },
    /// Solver state lost its weight vector.
    MissingWeights,

    // ---- Optimizer outcome ----
    /// Executor stopped for a reason other than convergence or the iteration cap.
    UnexpectedTermination {
        status: String,
    },

    // ---- Objective ----
    /// Trim count would discard the whole batch.
    InvalidTrimCount {
        trim: usize,
        batch_size: usize,
    },
    /// Other failure raised by the objective.
    ObjectiveFailed {
        text: String,
    },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MBGDOptions ----
            OptError::InvalidLearningRate { value, reason } => {
                write!(f, "Invalid learning rate {value}: {reason}")
            }
            OptError::InvalidBatchSize { batch_size, reason } => {
                write!(f, "Invalid batch size {batch_size}: {reason}")
            }
            OptError::BatchSizeExceedsSamples { batch_size, n_samples } => {
                write!(f, "Batch size {batch_size} exceeds the number of samples {n_samples}")
            }
            OptError::InvalidTolStep { tol, reason } => {
                write!(f, "Invalid step tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidInitScale { scale, reason } => {
                write!(f, "Invalid initialization scale {scale}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Weights ----
            OptError::WeightDimMismatch { expected, found } => {
                write!(f, "Weight dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidWeights { index, value, reason } => {
                write!(f, "Invalid weight at index {index}: {value}: {reason}")
            }
            OptError::MissingWeights => {
                write!(f, "Missing weight vector in solver state")
            }

            // ---- Optimizer outcome ----
            OptError::UnexpectedTermination { status } => {
                write!(f, "Unexpected termination: {status}")
            }

            // ---- Objective ----
            OptError::InvalidTrimCount { trim, batch_size } => {
                write!(f, "Trim count {trim} leaves no samples in a batch of {batch_size}")
            }
            OptError::ObjectiveFailed { text } => {
                write!(f, "Objective evaluation failed: {text}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised by our own objective travel through argmin boxed.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<RegressionError> for OptError {
    fn from(err: RegressionError) -> Self {
        match err {
            RegressionError::InvalidTrimCount { trim, batch_size } => {
                OptError::InvalidTrimCount { trim, batch_size }
            }
            RegressionError::Optimization(inner) => inner,
            other => OptError::ObjectiveFailed { text: other.to_string() },
        }
    }
}
