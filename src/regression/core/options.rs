//! Regression options — model-level configuration for trimmed fits.
//!
//! Purpose
//! -------
//! Bundle everything a [`TrimmedRegressor`](crate::regression::models::TrimmedRegressor)
//! needs besides the data: polynomial degree, loss kind, contamination
//! fraction ε, and the optimizer settings ([`MBGDOptions`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - ε is finite and lies in `[0, 0.5)`, so `floor(ε·B) < B` for every
//!   `B ≥ 1`.
//! - The loss kind and optimizer options are validated by their own
//!   constructors ([`LossKind::huber`], [`MBGDOptions::new`]). All fields are
//!   public, so [`RegressionOptions::validate`] re-checks the whole tree and
//!   `fit` calls it first.
//! - Checks that need the sample count (`B ≤ N`) run at the top of `fit`.
//!
//! Downstream usage
//! ----------------
//! - Start from `RegressionOptions::default()` (degree 1, squared loss,
//!   ε = 0, default optimizer) or call [`RegressionOptions::new`].
use crate::{
    optimization::mbgd::MBGDOptions,
    regression::{
        core::loss::LossKind,
        errors::{RegressionError, RegressionResult},
    },
};

/// Model configuration, immutable for the duration of a fit.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionOptions {
    /// Total polynomial degree P.
    pub degree: usize,
    /// Per-sample loss.
    pub loss: LossKind,
    /// Contamination fraction ε ∈ [0, 0.5).
    pub contamination: f64,
    /// Optimizer configuration (η, B, tolerances, init, seed, verbosity).
    pub mbgd: MBGDOptions,
}

impl RegressionOptions {
    /// # Errors
    /// - [`RegressionError::InvalidContamination`] if ε is non-finite or
    ///   outside `[0, 0.5)`.
    /// - [`RegressionError::InvalidHuberDelta`] for a hand-built Huber loss
    ///   with a bad δ.
    /// - [`RegressionError::Optimization`] for invalid optimizer options.
    pub fn new(
        degree: usize, loss: LossKind, contamination: f64, mbgd: MBGDOptions,
    ) -> RegressionResult<Self> {
        let opts = Self { degree, loss, contamination, mbgd };
        opts.validate()?;
        Ok(opts)
    }

    /// Check ε, the loss parameters and every optimizer option.
    pub fn validate(&self) -> RegressionResult<()> {
        verify_contamination(self.contamination)?;
        self.loss.validate()?;
        self.mbgd.validate()?;
        Ok(())
    }
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            degree: 1,
            loss: LossKind::Squared,
            contamination: 0.0,
            mbgd: MBGDOptions::default(),
        }
    }
}

/// Validate a contamination fraction.
///
/// # Errors
/// - [`RegressionError::InvalidContamination`] with a reason string.
pub fn verify_contamination(value: f64) -> RegressionResult<()> {
    if !value.is_finite() {
        return Err(RegressionError::InvalidContamination { value, reason: "must be finite" });
    }
    if !(0.0..0.5).contains(&value) {
        return Err(RegressionError::InvalidContamination {
            value,
            reason: "must lie in [0, 0.5)",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptError, mbgd::WeightInit};

    #[test]
    fn default_is_linear_untrimmed_squared() {
        let opts = RegressionOptions::default();

        assert_eq!(opts.degree, 1);
        assert_eq!(opts.loss, LossKind::Squared);
        assert_eq!(opts.contamination, 0.0);
        assert_eq!(opts.mbgd, MBGDOptions::default());
    }

    #[test]
    // Purpose
    // -------
    // ε is accepted on [0, 0.5) and rejected at 0.5, below 0 and for NaN.
    fn contamination_bounds() {
        let make = |eps| RegressionOptions::new(2, LossKind::Squared, eps, MBGDOptions::default());

        assert!(make(0.0).is_ok());
        assert!(make(0.499).is_ok());
        for bad in [0.5, -0.01, 1.0, f64::NAN] {
            assert!(matches!(make(bad), Err(RegressionError::InvalidContamination { .. })));
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate` sees values written straight into the public fields.
    //
    // Expect
    // ------
    // Each edited field is reported through its own variant.
    fn validate_catches_field_edits() {
        let mut opts = RegressionOptions::default();
        opts.loss = LossKind::Huber { delta: -1.0 };
        assert!(matches!(opts.validate(), Err(RegressionError::InvalidHuberDelta { .. })));

        let mut opts = RegressionOptions::default();
        opts.mbgd.learning_rate = -0.01;
        assert!(matches!(
            opts.validate(),
            Err(RegressionError::Optimization(OptError::InvalidLearningRate { .. }))
        ));

        let mut opts = RegressionOptions::default();
        opts.mbgd.tols.max_iter = 0;
        assert!(matches!(
            opts.validate(),
            Err(RegressionError::Optimization(OptError::InvalidMaxIter { .. }))
        ));

        let mut opts = RegressionOptions::default();
        opts.mbgd.init = WeightInit::SmallRandom { scale: 0.0 };
        assert!(matches!(
            opts.validate(),
            Err(RegressionError::Optimization(OptError::InvalidInitScale { .. }))
        ));

        assert_eq!(RegressionOptions::default().validate(), Ok(()));
    }
}
