//! mbgd::solver — trimmed mini-batch gradient descent as an Argmin solver.
//!
//! Purpose
//! -------
//! Implement the optimizer loop's per-iteration work as an Argmin
//! [`Solver`], so the same `Executor` machinery that drives the quasi-Newton
//! runs (iteration counting, `max_iters`, observers, function counters) also
//! drives the robust MBGD loop.
//!
//! Key behaviors
//! -------------
//! - `init` requires an initial weight vector and resets the step norm, so a
//!   reused solver never stops before its first update.
//! - `next_iter` draws a fresh batch from the owned [`BatchSampler`], asks the
//!   objective for its (trimmed) gradient estimate, validates it and applies
//!   `w ← w − η·g`.
//! - `terminate` reports `SolverConverged` once the last update moved the
//!   weights by less than `tol_step` in Euclidean norm. The iteration cap is
//!   enforced by Argmin (`MaxItersReached`).
//!
//! Invariants & assumptions
//! ------------------------
//! - The weight vector in the state always has length `objective.dim()`;
//!   gradients of any other length are rejected before the update.
//! - The convergence test uses a strict `<`, so `tol_step = 0` never
//!   triggers it and the run stops at `max_iter`.
//! - No randomness is drawn outside the sampler.
//!
//! Testing notes
//! -------------
//! - Unit tests run the solver through an `Executor` on a quadratic toy
//!   objective to check convergence, the iteration cap, and that gradient
//!   failures abort the run.
use crate::optimization::{
    errors::OptError,
    mbgd::{
        adapter::ArgMinAdapter,
        sampler::BatchSampler,
        traits::{BatchObjective, MBGDOptions},
        types::MbgdState,
        validation::validate_grad,
    },
};
use argmin::core::{Error, Problem, Solver, State, TerminationReason, TerminationStatus, KV};
use argmin::kv;
use argmin_math::{ArgminL2Norm, ArgminScaledSub};
use rand::RngCore;

/// Trimmed MBGD solver state carried between iterations.
#[derive(Debug, Clone)]
pub struct TrimmedMbgd<R: RngCore> {
    learning_rate: f64,
    tol_step: f64,
    sampler: BatchSampler<R>,
    last_step_norm: f64,
}

impl<R: RngCore> TrimmedMbgd<R> {
    pub fn new(opts: &MBGDOptions, sampler: BatchSampler<R>) -> Self {
        Self {
            learning_rate: opts.learning_rate,
            tol_step: opts.tols.tol_step,
            sampler,
            last_step_norm: f64::INFINITY,
        }
    }
}

impl<'a, F, R> Solver<ArgMinAdapter<'a, F>, MbgdState> for TrimmedMbgd<R>
where
    F: BatchObjective,
    R: RngCore,
{
    const NAME: &'static str = "Trimmed MBGD";

    fn init(
        &mut self, _problem: &mut Problem<ArgMinAdapter<'a, F>>, state: MbgdState,
    ) -> Result<(MbgdState, Option<KV>), Error> {
        if state.get_param().is_none() {
            return Err(OptError::MissingWeights.into());
        }
        self.last_step_norm = f64::INFINITY;
        Ok((state, None))
    }

    fn next_iter(
        &mut self, problem: &mut Problem<ArgMinAdapter<'a, F>>, mut state: MbgdState,
    ) -> Result<(MbgdState, Option<KV>), Error> {
        let weights = state.take_param().ok_or(OptError::MissingWeights)?;
        let batch = self.sampler.draw();
        let estimate =
            problem.problem("gradient_count", |adapter| adapter.batch_gradient(&weights, &batch))?;
        validate_grad(&estimate.gradient, weights.len())?;

        let updated = weights.scaled_sub(&self.learning_rate, &estimate.gradient);
        self.last_step_norm = (&updated - &weights).l2_norm();

        let diagnostics = kv!(
            "batch_loss" => estimate.loss;
            "trimmed" => estimate.trimmed as i64;
            "step_norm" => self.last_step_norm;
        );
        let state = state.param(updated).gradient(estimate.gradient).cost(estimate.loss);
        Ok((state, Some(diagnostics)))
    }

    fn terminate(&mut self, _state: &MbgdState) -> TerminationStatus {
        if self.last_step_norm < self.tol_step {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }
        TerminationStatus::NotTerminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptResult,
        mbgd::{
            traits::{BatchEstimate, Tolerances, WeightInit},
            types::{Cost, Weights},
        },
    };
    use argmin::core::Executor;
    use ndarray::{array, Array1};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Toy objective: every "row" i carries the same quadratic
    // ½‖w − target‖², so any batch yields the exact gradient `w − target`.
    // This isolates the update rule and the termination logic from sampling.
    // -------------------------------------------------------------------------
    struct Quadratic {
        target: Array1<f64>,
        n: usize,
        poison: bool,
    }

    impl BatchObjective for Quadratic {
        fn n_samples(&self) -> usize {
            self.n
        }

        fn dim(&self) -> usize {
            self.target.len()
        }

        fn value(&self, weights: &Weights) -> OptResult<Cost> {
            let diff = weights - &self.target;
            Ok(0.5 * diff.dot(&diff))
        }

        fn batch_gradient(&self, weights: &Weights, batch: &[usize]) -> OptResult<BatchEstimate> {
            let mut gradient = weights - &self.target;
            if self.poison {
                gradient[0] = f64::NAN;
            }
            let loss = self.value(weights)?;
            Ok(BatchEstimate { gradient, loss, kept: batch.len(), trimmed: 0 })
        }
    }

    fn options(learning_rate: f64, tol_step: f64, max_iter: usize) -> MBGDOptions {
        MBGDOptions::new(
            learning_rate,
            2,
            Tolerances::new(tol_step, max_iter).unwrap(),
            WeightInit::Zeros,
            Some(0),
            false,
        )
        .unwrap()
    }

    fn run(objective: &Quadratic, opts: &MBGDOptions) -> Result<MbgdState, Error> {
        let sampler = BatchSampler::new(objective.n, opts.batch_size, ChaCha8Rng::seed_from_u64(0))
            .map_err(Error::from)?;
        let solver = TrimmedMbgd::new(opts, sampler);
        let w0 = Weights::zeros(objective.dim());
        let max_iter = opts.tols.max_iter as u64;
        let result = Executor::new(ArgMinAdapter::new(objective), solver)
            .configure(|state| state.param(w0).max_iters(max_iter))
            .run()?;
        Ok(result.state().clone())
    }

    #[test]
    // Purpose
    // -------
    // With a contracting step the weights approach the target and the
    // step-norm test fires before the iteration cap.
    //
    // Expect
    // ------
    // - Termination reason `SolverConverged`.
    // - Iterations strictly below `max_iter`.
    // - Final weights within `tol_step / η` of the target.
    fn converges_on_quadratic_before_cap() {
        let objective = Quadratic { target: array![1.0, -2.0, 0.5], n: 4, poison: false };
        let opts = options(0.5, 1e-8, 10_000);

        let mut state = run(&objective, &opts).unwrap();

        assert_eq!(
            state.get_termination_status(),
            &TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        assert!(state.get_iter() < 10_000);
        let w = state.take_param().unwrap();
        for (a, b) in w.iter().zip(objective.target.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // A zero tolerance disables the convergence test; the executor must stop
    // at exactly `max_iter`.
    fn zero_tolerance_runs_to_max_iter() {
        let objective = Quadratic { target: array![3.0], n: 3, poison: false };
        let opts = options(0.1, 0.0, 37);

        let state = run(&objective, &opts).unwrap();

        assert_eq!(
            state.get_termination_status(),
            &TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        );
        assert_eq!(state.get_iter(), 37);
    }

    #[test]
    // Purpose
    // -------
    // A non-finite gradient aborts the run with `InvalidGradient` instead of
    // corrupting the weights.
    fn non_finite_gradient_aborts() {
        let objective = Quadratic { target: array![1.0, 1.0], n: 2, poison: true };
        let opts = options(0.1, 1e-6, 10);

        let err = run(&objective, &opts).unwrap_err();

        assert!(matches!(OptError::from(err), OptError::InvalidGradient { index: 0, .. }));
    }

    #[test]
    // Purpose
    // -------
    // `init` refuses to start without initial weights.
    fn init_requires_initial_weights() {
        let objective = Quadratic { target: array![0.0], n: 1, poison: false };
        let opts = options(0.1, 0.0, 1);
        let sampler = BatchSampler::new(1, 1, ChaCha8Rng::seed_from_u64(0)).unwrap();
        let mut solver = TrimmedMbgd::new(&opts, sampler);
        let mut problem = Problem::new(ArgMinAdapter::new(&objective));

        let err = Solver::init(&mut solver, &mut problem, MbgdState::new()).unwrap_err();

        assert_eq!(OptError::from(err), OptError::MissingWeights);
    }

    #[test]
    fn solver_reports_its_name() {
        type Mbgd = TrimmedMbgd<ChaCha8Rng>;

        assert_eq!(
            <Mbgd as Solver<ArgMinAdapter<'static, Quadratic>, MbgdState>>::NAME,
            "Trimmed MBGD"
        );
    }
}
