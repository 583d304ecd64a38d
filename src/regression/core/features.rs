//! Polynomial feature transformer with bias augmentation.
//!
//! Purpose
//! -------
//! Map raw input vectors of fixed arity `d` into the basis of all monomials of
//! total degree ≤ `P`, with the constant monomial (bias) first. The design
//! matrix the optimizer works on is built here once per fit, and the
//! predictor reuses the same transformer.
//!
//! Key behaviors
//! -------------
//! - [`PolynomialFeatures::new`] precomputes the exponent table once, so
//!   [`transform`](PolynomialFeatures::transform) is a pure table walk.
//! - Canonical order: graded by total degree ascending; within a degree,
//!   lexicographic with the first coordinate's exponent descending. For
//!   `d = 2, P = 2` this gives `[1, x1, x2, x1², x1·x2, x2²]`; for scalar
//!   inputs it reduces to `[1, x, x², …, x^P]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n_output_features() == C(d + P, P)` and is identical for every input.
//! - The degree is unsigned, so negative degrees cannot be expressed.
//! - Inputs of the wrong arity are rejected; values are not otherwise
//!   validated here (`RegressionData` enforces finiteness).
//!
//! Testing notes
//! -------------
//! - Unit tests pin the canonical order for scalar and bivariate inputs, the
//!   feature count formula, the degree-0 (bias only) case and arity errors.
use crate::regression::errors::{RegressionError, RegressionResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Polynomial basis of fixed degree over inputs of fixed arity.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFeatures {
    degree: usize,
    n_inputs: usize,
    exponents: Vec<Vec<u32>>,
}

impl PolynomialFeatures {
    /// Build the transformer for `n_inputs`-dimensional inputs and total
    /// degree `degree`.
    ///
    /// # Errors
    /// - [`RegressionError::ZeroArity`] if `n_inputs == 0`.
    pub fn new(degree: usize, n_inputs: usize) -> RegressionResult<Self> {
        if n_inputs == 0 {
            return Err(RegressionError::ZeroArity);
        }
        let mut exponents = Vec::new();
        for total in 0..=degree {
            let mut current = vec![0u32; n_inputs];
            push_compositions(total as u32, 0, &mut current, &mut exponents);
        }
        Ok(Self { degree, n_inputs, exponents })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    /// Feature dimension D (number of monomials including the bias).
    pub fn n_output_features(&self) -> usize {
        self.exponents.len()
    }

    /// Exponent vectors in canonical order; row `j` describes feature `j`.
    pub fn exponents(&self) -> &[Vec<u32>] {
        &self.exponents
    }

    /// Feature vector for a single raw input.
    ///
    /// # Errors
    /// - [`RegressionError::InputArityMismatch`] if `input.len() != n_inputs`.
    pub fn transform(&self, input: ArrayView1<f64>) -> RegressionResult<Array1<f64>> {
        self.check_arity(input.len())?;
        Ok(self.exponents.iter().map(|powers| monomial(input, powers)).collect())
    }

    /// Design matrix (`N × D`) for a batch of raw inputs (`N × d`).
    ///
    /// # Errors
    /// - [`RegressionError::InputArityMismatch`] if `inputs.ncols() != n_inputs`.
    pub fn transform_batch(&self, inputs: ArrayView2<f64>) -> RegressionResult<Array2<f64>> {
        self.check_arity(inputs.ncols())?;
        let mut out = Array2::zeros((inputs.nrows(), self.exponents.len()));
        for (raw, mut row) in inputs.axis_iter(Axis(0)).zip(out.axis_iter_mut(Axis(0))) {
            for (slot, powers) in row.iter_mut().zip(self.exponents.iter()) {
                *slot = monomial(raw, powers);
            }
        }
        Ok(out)
    }

    fn check_arity(&self, found: usize) -> RegressionResult<()> {
        if found != self.n_inputs {
            return Err(RegressionError::InputArityMismatch { expected: self.n_inputs, found });
        }
        Ok(())
    }
}

// ---- Helper Methods ----

/// Append every exponent vector with coordinates `pos..` summing to
/// `remaining`, first coordinate descending.
fn push_compositions(
    remaining: u32, pos: usize, current: &mut Vec<u32>, out: &mut Vec<Vec<u32>>,
) {
    if pos + 1 == current.len() {
        current[pos] = remaining;
        out.push(current.clone());
        return;
    }
    for e in (0..=remaining).rev() {
        current[pos] = e;
        push_compositions(remaining - e, pos + 1, current, out);
    }
    current[pos] = 0;
}

fn monomial(input: ArrayView1<f64>, powers: &[u32]) -> f64 {
    input.iter().zip(powers).map(|(&x, &p)| x.powi(p as i32)).product()
}
