//! mbgd::types — shared numeric aliases and solver-state wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types used by the trimmed mini-batch optimizer so
//! the rest of the optimization code stays agnostic to `ndarray` and Argmin
//! generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for weight vectors, gradients and scalar costs
//!   (`Weights`, `Grad`, `Cost`).
//! - Provide the Argmin iteration-state alias (`MbgdState`) shared by the
//!   solver and the runner.
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors are `ndarray` containers over `f64`.
//! - `Cost` is always a non-negative mean loss; there is no sign flip
//!   between user-facing values and solver costs.
//!
//! Testing notes
//! -------------
//! - This module only defines type aliases; correctness is exercised by the
//!   solver and runner tests that instantiate them.
use argmin::core::IterState;
use ndarray::Array1;
use std::collections::HashMap;

/// Weight vector `w` over the polynomial feature basis.
pub type Weights = Array1<f64>;

/// Gradient of the (trimmed) mean loss with respect to `w`.
pub type Grad = Array1<f64>;

/// Scalar objective value (mean loss over kept samples).
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"gradient_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Argmin iteration state used by the trimmed MBGD solver.
///
/// Only parameters, gradient and cost are tracked; Jacobian, Hessian and
/// residual slots are unused.
pub type MbgdState = IterState<Weights, Grad, (), (), (), f64>;
