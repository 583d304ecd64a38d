//! High-level entry points for minimizing a [`BatchObjective`] with trimmed
//! mini-batch gradient descent.
//!
//! Both functions validate the starting point, build a [`BatchSampler`] over
//! the objective's rows, wrap the objective in an `ArgMinAdapter`, and
//! delegate to `run_mbgd`.
use crate::optimization::{
    errors::OptResult,
    mbgd::{
        adapter::ArgMinAdapter,
        run::run_mbgd,
        sampler::BatchSampler,
        solver::TrimmedMbgd,
        traits::{BatchObjective, MBGDOptions, OptimOutcome},
        types::Weights,
        validation::verify_batch_fits,
    },
};
use rand::RngCore;

/// Minimize `f` from `w0`, sampling batches from `opts.make_rng()`.
///
/// # Errors
/// - Any option error from [`MBGDOptions::validate`].
/// - Propagates any error from `f.check`.
/// - `OptError::BatchSizeExceedsSamples` if `opts.batch_size > f.n_samples()`.
/// - Propagates runtime errors from `run_mbgd`.
///
/// # Example
/// ```no_run
/// use ndarray::Array1;
/// use trimmed_regression::optimization::{
///     errors::OptResult,
///     mbgd::{minimize, BatchEstimate, BatchObjective, MBGDOptions, Weights},
/// };
///
/// // ½‖w − 1‖² on every row.
/// struct Bowl;
/// impl BatchObjective for Bowl {
///     fn n_samples(&self) -> usize { 8 }
///     fn dim(&self) -> usize { 2 }
///     fn value(&self, w: &Weights) -> OptResult<f64> {
///         Ok(0.5 * w.mapv(|v| (v - 1.0).powi(2)).sum())
///     }
///     fn batch_gradient(&self, w: &Weights, batch: &[usize]) -> OptResult<BatchEstimate> {
///         let gradient = w.mapv(|v| v - 1.0);
///         Ok(BatchEstimate { gradient, loss: self.value(w)?, kept: batch.len(), trimmed: 0 })
///     }
/// }
///
/// let opts = MBGDOptions { batch_size: 4, seed: Some(7), ..MBGDOptions::default() };
/// let out = minimize(&Bowl, Array1::zeros(2), &opts)?;
/// println!("w = {:?} after {} iterations", out.weights, out.iterations);
/// # Ok::<(), trimmed_regression::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: BatchObjective>(
    f: &F, w0: Weights, opts: &MBGDOptions,
) -> OptResult<OptimOutcome> {
    minimize_with_rng(f, w0, opts, opts.make_rng())
}

/// Minimize `f` from `w0`, sampling batches from the injected `rng`.
///
/// `opts.seed` is ignored; the caller controls reproducibility through `rng`.
pub fn minimize_with_rng<F, R>(
    f: &F, w0: Weights, opts: &MBGDOptions, rng: R,
) -> OptResult<OptimOutcome>
where
    F: BatchObjective,
    R: RngCore + Send + 'static,
{
    opts.validate()?;
    f.check(&w0)?;
    verify_batch_fits(opts.batch_size, f.n_samples())?;
    let sampler = BatchSampler::new(f.n_samples(), opts.batch_size, rng)?;
    let solver = TrimmedMbgd::new(opts, sampler);
    run_mbgd(w0, opts, ArgMinAdapter::new(f), solver)
}
