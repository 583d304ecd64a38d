//! trimmed_regression — robust polynomial regression with trimmed mini-batch
//! gradient descent.
//!
//! Purpose
//! -------
//! Serve as the crate root for fitting polynomial regression models to data
//! that may contain a fraction ε of corrupted samples. Each descent step
//! discards the highest-loss members of its batch before averaging, bounding
//! the influence of outliers on the update.
//!
//! Key behaviors
//! -------------
//! - `regression`: feature transformer, loss kinds (squared, Huber), trimmed
//!   gradient estimator, preprocessors and the `TrimmedRegressor` model.
//! - `optimization`: the mini-batch descent loop, implemented as an Argmin
//!   solver with a seedable batch sampler, plus the optimizer error surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - All randomness (initial weights and batches) comes from an injected or
//!   seeded generator; fits are reproducible for a fixed seed.
//! - Configuration errors are reported eagerly; failing to converge within
//!   `max_iter` is a terminal state, not an error.
//!
//! Conventions
//! -----------
//! - Inputs are `N × d` matrices of `f64`; targets are length-`N` vectors.
//! - No logging unless the `obs_slog` feature is enabled and the optimizer
//!   options ask for verbose output.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::Array1;
//! use trimmed_regression::regression::prelude::*;
//!
//! let x = Array1::linspace(-1.0, 1.0, 200);
//! let y = x.mapv(|v| 2.0 * v + 1.0);
//! let data = RegressionData::from_scalar(x, y)?;
//!
//! let mut opts = RegressionOptions::default();
//! opts.contamination = 0.1;
//! opts.mbgd.seed = Some(42);
//!
//! let mut model = TrimmedRegressor::new(opts);
//! let summary = model.fit(&data)?;
//! println!("{:?} after {} iterations", summary.state, summary.iterations);
//! let y_hat = model.predict_scalar(0.5)?;
//! # let _ = y_hat;
//! # Ok::<(), RegressionError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module.
//! - `tests/integration_trimmed_pipeline.rs` runs full fits on synthetic,
//!   contaminated data.

pub mod optimization;
pub mod regression;
