//! optimization — trimmed MBGD stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used for model fitting: an Argmin-driven
//! mini-batch gradient descent loop whose per-batch gradient is supplied by
//! the model (and may be trimmed), plus a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing** a batch objective (`mbgd`),
//!   including configuration of step size, batch size and stopping rules.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module avoids I/O and logging unless the `obs_slog` feature is
//!   enabled and the caller asked for verbose output.

pub mod errors;
pub mod mbgd;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use trimmed_regression::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::mbgd::prelude::*;
}
