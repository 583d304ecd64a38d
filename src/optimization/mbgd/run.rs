//! Execution helper that runs the trimmed MBGD solver through an Argmin
//! `Executor` and returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    mbgd::{
        adapter::ArgMinAdapter,
        solver::TrimmedMbgd,
        traits::{BatchObjective, MBGDOptions, OptimOutcome},
        types::Weights,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, State};
use rand::RngCore;

/// Run trimmed MBGD on `problem` starting from `w0`.
///
/// Wires up:
/// - the objective via [`ArgMinAdapter`],
/// - the [`TrimmedMbgd`] solver (which owns the batch sampler),
/// - the initial weights and `max_iters`,
/// - an optional slog observer (behind the `obs_slog` feature),
///
/// then executes the solver and converts the final state into an
/// [`OptimOutcome`]. The reported weights are the **last iterate**; the
/// reported value is the objective's full-data loss at those weights.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always` and a one-time
/// pre-iteration line logs the training loss at `w0`.
///
/// # Errors
/// - Propagates any `argmin` runtime error, including objective and gradient
///   validation failures raised inside the solver.
/// - Propagates validation errors from [`OptimOutcome::new`].
pub fn run_mbgd<'a, F, R>(
    w0: Weights, opts: &MBGDOptions, problem: ArgMinAdapter<'a, F>, solver: TrimmedMbgd<R>,
) -> OptResult<OptimOutcome>
where
    F: BatchObjective,
    R: RngCore + Send + 'static,
{
    let objective = problem.f;
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&w0, &problem)?;
    }
    let max_iter = opts.tols.max_iter as u64;
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(w0).max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let weights = result.take_param();
    let value = match &weights {
        Some(w) => objective.value(w)?,
        None => f64::NAN,
    };
    OptimOutcome::new(weights, value, termination, iterations, function_counts, grad)
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(w0: &Weights, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: BatchObjective,
{
    let loss0 = problem.cost(w0)?;
    eprintln!("init: training loss(w0) = {loss0:.6}, dim = {}", w0.len());
    Ok(())
}
