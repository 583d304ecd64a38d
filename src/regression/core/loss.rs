//! Per-sample loss kinds used by the trimmed estimator.
//!
//! Each [`LossKind`] exposes a loss on the residual `r = prediction − target`
//! and its analytic derivative with respect to `r`:
//!
//! - squared: `loss = r²`, `gradient_factor = 2r`.
//! - Huber(δ): `loss = ½r²` for `|r| ≤ δ`, else `δ(|r| − ½δ)`;
//!   `gradient_factor = r` for `|r| ≤ δ`, else `δ·sign(r)`.
//!
//! `gradient_factor` must stay the exact derivative of `loss`; the unit tests
//! check this against central finite differences.
use crate::regression::errors::{RegressionError, RegressionResult};

/// Loss kind, resolved once per model and matched once per sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LossKind {
    #[default]
    Squared,
    Huber { delta: f64 },
}

impl LossKind {
    pub fn squared() -> Self {
        LossKind::Squared
    }

    /// Huber loss with threshold `delta`.
    ///
    /// # Errors
    /// - [`RegressionError::InvalidHuberDelta`] if `delta` is non-finite or ≤ 0.
    pub fn huber(delta: f64) -> RegressionResult<Self> {
        let kind = LossKind::Huber { delta };
        kind.validate()?;
        Ok(kind)
    }

    /// Check the parameters of a loss built by hand.
    ///
    /// # Errors
    /// - [`RegressionError::InvalidHuberDelta`] if `delta` is non-finite or ≤ 0.
    pub fn validate(&self) -> RegressionResult<()> {
        let LossKind::Huber { delta } = *self else {
            return Ok(());
        };
        if !delta.is_finite() {
            let reason = "must be finite";
            return Err(RegressionError::InvalidHuberDelta { value: delta, reason });
        }
        if delta <= 0.0 {
            return Err(RegressionError::InvalidHuberDelta {
                value: delta,
                reason: "must be strictly positive",
            });
        }
        Ok(())
    }

    /// Per-sample loss at residual `r`.
    #[inline]
    pub fn loss(&self, r: f64) -> f64 {
        match *self {
            LossKind::Squared => r * r,
            LossKind::Huber { delta } => {
                let a = r.abs();
                if a <= delta {
                    0.5 * r * r
                } else {
                    delta * (a - 0.5 * delta)
                }
            }
        }
    }

    /// Derivative of [`loss`](Self::loss) with respect to `r`.
    #[inline]
    pub fn gradient_factor(&self, r: f64) -> f64 {
        match *self {
            LossKind::Squared => 2.0 * r,
            LossKind::Huber { delta } => {
                if r.abs() <= delta {
                    r
                } else {
                    delta * r.signum()
                }
            }
        }
    }
}
