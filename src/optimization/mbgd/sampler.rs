//! Uniform batch sampling without replacement.
//!
//! The sampler owns an injected random source, so tests and callers that need
//! reproducible runs pass a seeded generator instead of relying on a hidden
//! global one. Every `draw` is independent of the previous ones; a given row
//! can land in many, few or no batches over a run.
use crate::optimization::{
    errors::OptResult,
    mbgd::validation::{verify_batch_fits, verify_batch_size},
};
use rand::{seq::index, RngCore};

/// Draws batches of `batch_size` distinct row indices from `[0, n_samples)`.
#[derive(Debug, Clone)]
pub struct BatchSampler<R: RngCore> {
    n_samples: usize,
    batch_size: usize,
    rng: R,
}

impl<R: RngCore> BatchSampler<R> {
    /// Build a sampler over `n_samples` rows.
    ///
    /// # Errors
    /// - `OptError::InvalidBatchSize` if `batch_size == 0`.
    /// - `OptError::BatchSizeExceedsSamples` if `batch_size > n_samples`.
    pub fn new(n_samples: usize, batch_size: usize, rng: R) -> OptResult<Self> {
        verify_batch_size(batch_size)?;
        verify_batch_fits(batch_size, n_samples)?;
        Ok(Self { n_samples, batch_size, rng })
    }

    /// Draw one batch. The returned order is the batch position used for
    /// tie-breaking downstream.
    pub fn draw(&mut self) -> Vec<usize> {
        index::sample(&mut self.rng, self.n_samples, self.batch_size).into_vec()
    }
}
