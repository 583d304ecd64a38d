//! Validation helpers for trimmed mini-batch optimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Option checks**: [`verify_learning_rate`], [`verify_batch_size`],
//!   [`verify_tol_step`], [`verify_max_iter`], [`verify_init_scale`].
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Weights**: [`validate_weights`] checks dimension and finiteness of a
//!   weight vector before or after a run.
//! - **Objective values**: [`validate_value`] checks loss outputs for
//!   finiteness.
//!
//! These helpers return domain-specific [`OptError`] variants so higher-level
//! code reports failures uniformly.
use crate::optimization::{
    errors::{OptError, OptResult},
    mbgd::types::{Grad, Weights},
};

/// Validate the learning rate `η`.
///
/// # Errors
/// Returns [`OptError::InvalidLearningRate`] if `η` is non-finite or ≤ 0.0.
pub fn verify_learning_rate(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidLearningRate {
            value,
            reason: "Learning rate must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(OptError::InvalidLearningRate {
            value,
            reason: "Learning rate must be positive.",
        });
    }
    Ok(())
}

/// Validate the batch size on its own (the sample count is checked later).
///
/// # Errors
/// Returns [`OptError::InvalidBatchSize`] if the batch size is zero.
pub fn verify_batch_size(batch_size: usize) -> OptResult<()> {
    if batch_size == 0 {
        return Err(OptError::InvalidBatchSize {
            batch_size,
            reason: "Batch size must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the batch size against the number of available samples.
///
/// # Errors
/// Returns [`OptError::BatchSizeExceedsSamples`] if `batch_size > n_samples`.
pub fn verify_batch_fits(batch_size: usize, n_samples: usize) -> OptResult<()> {
    if batch_size > n_samples {
        return Err(OptError::BatchSizeExceedsSamples { batch_size, n_samples });
    }
    Ok(())
}

/// Validate the step-norm tolerance used for convergence.
///
/// Zero is allowed and disables the convergence test.
///
/// # Errors
/// Returns [`OptError::InvalidTolStep`] if the value is non-finite or < 0.0.
pub fn verify_tol_step(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolStep { tol, reason: "Tolerance must be finite." });
    }
    if tol < 0.0 {
        return Err(OptError::InvalidTolStep { tol, reason: "Tolerance must be non-negative." });
    }
    Ok(())
}

/// Validate the iteration cap.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the half-width of the uniform random weight initialization.
///
/// # Errors
/// Returns [`OptError::InvalidInitScale`] if the value is non-finite or ≤ 0.0.
pub fn verify_init_scale(scale: f64) -> OptResult<()> {
    if !scale.is_finite() {
        return Err(OptError::InvalidInitScale { scale, reason: "Scale must be finite." });
    }
    if scale <= 0.0 {
        return Err(OptError::InvalidInitScale { scale, reason: "Scale must be positive." });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate a weight vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::WeightDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidWeights`] for the first non-finite element.
pub fn validate_weights(weights: &Weights, dim: usize) -> OptResult<()> {
    if weights.len() != dim {
        return Err(OptError::WeightDimMismatch { expected: dim, found: weights.len() });
    }
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidWeights {
                index,
                value,
                reason: "Weights must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate that a scalar loss value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}
