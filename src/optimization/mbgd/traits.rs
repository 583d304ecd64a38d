//! Public API surface for trimmed mini-batch optimization.
//!
//! - [`BatchObjective`]: trait models implement to expose per-batch gradients.
//! - [`MBGDOptions`], [`Tolerances`] and [`WeightInit`]: optimizer configuration.
//! - [`FitState`]: the optimizer's state machine.
//! - [`OptimOutcome`]: normalized result returned by the high-level `minimize` API.
//!
//! Convention: the optimizer *minimizes* a mean loss. The objective decides
//! which samples of a batch contribute (e.g., after trimming); the solver only
//! sees the resulting gradient estimate.
use crate::optimization::{
    errors::{OptError, OptResult},
    mbgd::{
        types::{Cost, FnEvalMap, Grad, Weights},
        validation::{
            validate_value, validate_weights, verify_batch_size, verify_init_scale,
            verify_learning_rate, verify_max_iter, verify_tol_step,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Gradient estimate returned by [`BatchObjective::batch_gradient`].
///
/// - `gradient`: mean gradient over the contributing samples.
/// - `loss`: mean loss over the contributing samples.
/// - `kept`: number of samples that contributed.
/// - `trimmed`: number of samples discarded before averaging.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEstimate {
    pub gradient: Grad,
    pub loss: Cost,
    pub kept: usize,
    pub trimmed: usize,
}

/// User-implemented mini-batch objective.
///
/// Required:
/// - `n_samples()`: number of rows the sampler may index into.
/// - `dim()`: length of the weight vector.
/// - `value(&Weights)`: full-data objective, used for the reported training
///   loss and the initial-state log line.
/// - `batch_gradient(&Weights, &[usize])`: gradient estimate over the given
///   row indices. The indices are distinct and their order is the batch
///   position used for any tie-breaking.
///
/// Provided:
/// - `check(&Weights)`: validation hook called once before optimization;
///   the default verifies dimension and finiteness.
pub trait BatchObjective {
    fn n_samples(&self) -> usize;
    fn dim(&self) -> usize;
    fn value(&self, weights: &Weights) -> OptResult<Cost>;
    fn batch_gradient(&self, weights: &Weights, batch: &[usize]) -> OptResult<BatchEstimate>;

    fn check(&self, weights: &Weights) -> OptResult<()> {
        validate_weights(weights, self.dim())
    }
}

/// Optimizer state machine.
///
/// `Initialized → Iterating → {Converged, MaxIterReached}`. Both terminal
/// states stop any further mutation of the weights. `fit` runs to completion
/// before returning, so callers only ever see `Initialized` or a terminal
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitState {
    Initialized,
    Iterating,
    Converged,
    MaxIterReached,
}

impl FitState {
    /// `true` for `Converged` and `MaxIterReached`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FitState::Converged | FitState::MaxIterReached)
    }
}

/// Stopping rules.
///
/// - `tol_step`: stop once `‖w_{t+1} − w_t‖₂ < tol_step`. Zero disables the
///   test, so the run always reaches `max_iter`.
/// - `max_iter`: hard cap on the number of updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_step: f64,
    pub max_iter: usize,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolStep`] for negative or non-finite tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(tol_step: f64, max_iter: usize) -> OptResult<Self> {
        let tols = Self { tol_step, max_iter };
        tols.validate()?;
        Ok(tols)
    }

    /// Re-check the fields, which may have been edited after construction.
    pub fn validate(&self) -> OptResult<()> {
        verify_tol_step(self.tol_step)?;
        verify_max_iter(self.max_iter)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_step: 1e-6, max_iter: 1000 }
    }
}

/// How the weight vector is initialized at the start of every fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightInit {
    /// All weights start at zero.
    Zeros,
    /// Weights drawn independently from `U(-scale, scale)`.
    SmallRandom { scale: f64 },
}

impl WeightInit {
    /// Uniform random initialization with a validated half-width.
    pub fn small_random(scale: f64) -> OptResult<Self> {
        let init = WeightInit::SmallRandom { scale };
        init.validate()?;
        Ok(init)
    }

    /// # Errors
    /// - [`OptError::InvalidInitScale`] for a non-finite or non-positive scale.
    pub fn validate(&self) -> OptResult<()> {
        match *self {
            WeightInit::Zeros => Ok(()),
            WeightInit::SmallRandom { scale } => verify_init_scale(scale),
        }
    }

    /// Produce an initial weight vector of length `dim`.
    ///
    /// `Zeros` consumes no randomness, so seeded runs with zero init see the
    /// exact same batch sequence as a sampler built from the same seed.
    pub fn draw<R: Rng>(&self, dim: usize, rng: &mut R) -> Weights {
        match *self {
            WeightInit::Zeros => Weights::zeros(dim),
            WeightInit::SmallRandom { scale } => {
                Weights::from_iter((0..dim).map(|_| rng.random_range(-scale..scale)))
            }
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `learning_rate`: step size `η > 0`.
/// - `batch_size`: rows per batch, `0 < B ≤ N` (the upper bound is checked
///   against the data at fit time).
/// - `tols`: stopping rules.
/// - `init`: weight initialization policy.
/// - `seed`: seed for the batch sampler / initializer; `None` draws one from
///   the thread RNG.
/// - `verbose`: if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default: `η = 0.01`, `B = 32`, `tol_step = 1e-6`, `max_iter = 1000`,
/// zero init, no seed, quiet.
#[derive(Debug, Clone, PartialEq)]
pub struct MBGDOptions {
    pub learning_rate: f64,
    pub batch_size: usize,
    pub tols: Tolerances,
    pub init: WeightInit,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl MBGDOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLearningRate`] for non-positive or non-finite `η`.
    /// - [`OptError::InvalidBatchSize`] if `batch_size == 0`.
    /// - [`OptError::InvalidInitScale`] for an invalid random-init scale.
    /// - [`OptError::InvalidTolStep`] / [`OptError::InvalidMaxIter`] for
    ///   tolerances assembled without [`Tolerances::new`].
    pub fn new(
        learning_rate: f64, batch_size: usize, tols: Tolerances, init: WeightInit,
        seed: Option<u64>, verbose: bool,
    ) -> OptResult<Self> {
        let opts = Self { learning_rate, batch_size, tols, init, seed, verbose };
        opts.validate()?;
        Ok(opts)
    }

    /// Check every field. The fields are public, so `minimize` and `fit`
    /// call this again before any work.
    ///
    /// # Errors
    /// Same as [`MBGDOptions::new`].
    pub fn validate(&self) -> OptResult<()> {
        verify_learning_rate(self.learning_rate)?;
        verify_batch_size(self.batch_size)?;
        self.tols.validate()?;
        self.init.validate()
    }

    /// Random source for one fit: seeded when `seed` is set, otherwise
    /// seeded from the thread-local generator.
    pub fn make_rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for MBGDOptions {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            batch_size: 32,
            tols: Tolerances::default(),
            init: WeightInit::Zeros,
            seed: None,
            verbose: false,
        }
    }
}

/// Canonical result returned by `minimize` (the fit summary).
///
/// - `weights`: final weight vector (the last iterate, not the lowest
///   batch loss seen).
/// - `value`: training loss at `weights`, as defined by
///   [`BatchObjective::value`].
/// - `state`: terminal [`FitState`].
/// - `converged`: `true` iff `state == Converged`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of updates performed (`≤ max_iter`).
/// - `fn_evals`: evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last batch gradient, if any step ran.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub weights: Weights,
    pub value: f64,
    pub state: FitState,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - presence + finiteness check of the final weights,
    /// - finiteness check of `value`,
    /// - mapping of the Argmin `TerminationStatus` onto [`FitState`].
    ///
    /// # Errors
    /// - [`OptError::MissingWeights`] / [`OptError::InvalidWeights`].
    /// - [`OptError::NonFiniteCost`] for a non-finite training loss.
    /// - [`OptError::UnexpectedTermination`] if the run stopped for any reason
    ///   other than convergence or the iteration cap.
    pub fn new(
        weights_opt: Option<Weights>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let weights = weights_opt.ok_or(OptError::MissingWeights)?;
        validate_weights(&weights, weights.len())?;
        validate_value(value)?;
        let state = match &termination {
            TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
                FitState::Converged
            }
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                FitState::MaxIterReached
            }
            other => {
                return Err(OptError::UnexpectedTermination { status: format!("{other:?}") });
            }
        };
        let status = format!("{termination:?}");
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            weights,
            value,
            state,
            converged: state == FitState::Converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand_chacha::ChaCha8Rng;

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` accepts a zero step tolerance and rejects a zero
    // iteration cap.
    fn tolerances_validate_inputs() {
        assert!(Tolerances::new(0.0, 1).is_ok());
        assert!(matches!(Tolerances::new(1e-6, 0), Err(OptError::InvalidMaxIter { .. })));
        assert!(matches!(Tolerances::new(-1.0, 10), Err(OptError::InvalidTolStep { .. })));
    }

    #[test]
    fn mbgd_options_reject_invalid_learning_rate_and_batch() {
        let tols = Tolerances::default();
        assert!(matches!(
            MBGDOptions::new(0.0, 8, tols, WeightInit::Zeros, None, false),
            Err(OptError::InvalidLearningRate { .. })
        ));
        assert!(matches!(
            MBGDOptions::new(0.1, 0, tols, WeightInit::Zeros, None, false),
            Err(OptError::InvalidBatchSize { .. })
        ));
        assert!(matches!(
            MBGDOptions::new(0.1, 8, tols, WeightInit::SmallRandom { scale: 0.0 }, None, false),
            Err(OptError::InvalidInitScale { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Options assembled from struct literals or edited after construction
    // are caught by `validate`, including tolerances that bypassed
    // `Tolerances::new`.
    fn validate_rechecks_public_fields() {
        let bad_tols = Tolerances { tol_step: 1e-6, max_iter: 0 };
        assert!(matches!(
            MBGDOptions::new(0.1, 8, bad_tols, WeightInit::Zeros, None, false),
            Err(OptError::InvalidMaxIter { .. })
        ));

        let mut opts = MBGDOptions::default();
        assert_eq!(opts.validate(), Ok(()));
        opts.learning_rate = f64::NAN;
        assert!(matches!(opts.validate(), Err(OptError::InvalidLearningRate { .. })));

        let opts = MBGDOptions {
            tols: Tolerances { tol_step: -1.0, max_iter: 10 },
            ..MBGDOptions::default()
        };
        assert!(matches!(opts.validate(), Err(OptError::InvalidTolStep { .. })));

        let opts = MBGDOptions { batch_size: 0, ..MBGDOptions::default() };
        assert!(matches!(opts.validate(), Err(OptError::InvalidBatchSize { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Random initialization stays inside `(-scale, scale)` and zero
    // initialization draws nothing from the generator.
    fn weight_init_respects_scale_and_zero_policy() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let w = WeightInit::small_random(0.05).unwrap().draw(16, &mut rng);
        assert_eq!(w.len(), 16);
        assert!(w.iter().all(|v| v.abs() < 0.05));

        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        let zeros = WeightInit::Zeros.draw(4, &mut a);
        assert!(zeros.iter().all(|&v| v == 0.0));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn seeded_options_produce_identical_generators() {
        let opts = MBGDOptions { seed: Some(42), ..MBGDOptions::default() };
        let mut a = opts.make_rng();
        let mut b = opts.make_rng();
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    // Purpose
    // -------
    // Termination reasons map onto the two terminal fit states; anything
    // else is surfaced as an error.
    fn outcome_maps_termination_to_fit_state() {
        let converged = OptimOutcome::new(
            Some(array![1.0, 2.0]),
            0.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
            Some(array![3.0, 4.0]),
        )
        .unwrap();
        assert_eq!(converged.state, FitState::Converged);
        assert!(converged.converged);
        assert_eq!(converged.iterations, 12);
        assert_eq!(converged.grad_norm, Some(5.0));

        let capped = OptimOutcome::new(
            Some(array![1.0]),
            0.5,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            100,
            FnEvalMap::new(),
            None,
        )
        .unwrap();
        assert_eq!(capped.state, FitState::MaxIterReached);
        assert!(!capped.converged);
        assert!(capped.state.is_terminal());

        let not_done = OptimOutcome::new(
            Some(array![1.0]),
            0.5,
            TerminationStatus::NotTerminated,
            3,
            FnEvalMap::new(),
            None,
        );
        assert!(matches!(not_done, Err(OptError::UnexpectedTermination { .. })));
    }

    #[test]
    fn outcome_rejects_missing_or_non_finite_results() {
        let status = TerminationStatus::Terminated(TerminationReason::MaxItersReached);
        assert_eq!(
            OptimOutcome::new(None, 0.0, status.clone(), 1, FnEvalMap::new(), None),
            Err(OptError::MissingWeights)
        );
        assert!(matches!(
            OptimOutcome::new(Some(array![0.0]), f64::NAN, status, 1, FnEvalMap::new(), None),
            Err(OptError::NonFiniteCost { .. })
        ));
    }
}
