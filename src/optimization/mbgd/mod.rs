//! mbgd — robust mini-batch gradient descent on top of Argmin.
//!
//! Purpose
//! -------
//! Provide an Argmin-backed optimization layer for **minimizing mean losses
//! over sampled batches**, where the objective may discard part of every
//! batch (trimming) before averaging. Callers implement a single trait,
//! [`BatchObjective`], and invoke [`minimize`] / [`minimize_with_rng`].
//!
//! Key behaviors
//! -------------
//! - Draw batches uniformly without replacement through [`sampler`], using an
//!   injected, seedable random source.
//! - Run [`solver::TrimmedMbgd`] inside an Argmin `Executor`
//!   ([`run::run_mbgd`]) so iteration caps, function counters and observers
//!   come from the same machinery as any other Argmin solver.
//! - Normalize results into an [`OptimOutcome`] whose [`FitState`] is either
//!   `Converged` (step norm below tolerance) or `MaxIterReached`.
//! - Centralize configuration ([`Tolerances`], [`WeightInit`],
//!   [`MBGDOptions`]) and validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Failure to converge is **not** an error; it is reported through
//!   `FitState::MaxIterReached`.
//! - Gradients must have the weight dimension and be finite; anything else
//!   aborts the run with an [`OptError`](crate::optimization::errors::OptError).
//! - Configuration types are validated on construction.
//!
//! Conventions
//! -----------
//! - Weights live in [`Weights`] (`Array1<f64>`); the solver never reshapes
//!   them.
//! - Batch indices are positions into the objective's rows; their order is
//!   the batch position the objective may use for tie-breaking.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover the sampler's distribution properties,
//!   option validation, outcome mapping, and the solver's termination
//!   logic on toy quadratics.
//! - Integration tests exercise [`minimize_with_rng`] through the regression
//!   model.

pub mod adapter;
pub mod api;
pub mod run;
pub mod sampler;
pub mod solver;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_with_rng};
pub use self::sampler::BatchSampler;
pub use self::traits::{
    BatchEstimate, BatchObjective, FitState, MBGDOptions, OptimOutcome, Tolerances, WeightInit,
};
pub use self::types::{Cost, FnEvalMap, Grad, MbgdState, Weights};

pub mod prelude {
    pub use super::api::{minimize, minimize_with_rng};
    pub use super::traits::{
        BatchEstimate, BatchObjective, FitState, MBGDOptions, OptimOutcome, Tolerances,
        WeightInit,
    };
    pub use super::types::{Grad, Weights};
}
