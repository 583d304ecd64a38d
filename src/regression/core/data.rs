//! Validated training samples.
//!
//! [`RegressionData`] pairs an `N × d` matrix of raw inputs with `N` scalar
//! targets. Construction rejects empty data, mismatched lengths, zero-width
//! inputs and non-finite values, so the model and the estimator can index
//! rows by position without re-checking.
use crate::regression::errors::{RegressionError, RegressionResult};
use ndarray::{Array1, Array2, Axis};

/// Ordered training samples; row `i` of `inputs` belongs to `targets[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionData {
    pub inputs: Array2<f64>,
    pub targets: Array1<f64>,
}

impl RegressionData {
    /// Validate and wrap raw inputs and targets.
    ///
    /// # Errors
    /// - [`RegressionError::EmptySample`] if there are no rows.
    /// - [`RegressionError::ZeroArity`] if inputs have no columns.
    /// - [`RegressionError::LengthMismatch`] if row and target counts differ.
    /// - [`RegressionError::NonFiniteInput`] / [`RegressionError::NonFiniteTarget`]
    ///   for the first NaN/±inf encountered.
    pub fn new(inputs: Array2<f64>, targets: Array1<f64>) -> RegressionResult<Self> {
        if inputs.nrows() == 0 || targets.is_empty() {
            return Err(RegressionError::EmptySample);
        }
        if inputs.ncols() == 0 {
            return Err(RegressionError::ZeroArity);
        }
        if inputs.nrows() != targets.len() {
            return Err(RegressionError::LengthMismatch {
                inputs: inputs.nrows(),
                targets: targets.len(),
            });
        }
        for ((row, col), &value) in inputs.indexed_iter() {
            if !value.is_finite() {
                return Err(RegressionError::NonFiniteInput { row, col, value });
            }
        }
        for (index, &value) in targets.iter().enumerate() {
            if !value.is_finite() {
                return Err(RegressionError::NonFiniteTarget { index, value });
            }
        }
        Ok(Self { inputs, targets })
    }

    /// Scalar inputs (`d = 1`).
    pub fn from_scalar(x: Array1<f64>, y: Array1<f64>) -> RegressionResult<Self> {
        Self::new(x.insert_axis(Axis(1)), y)
    }

    pub fn n_samples(&self) -> usize {
        self.targets.len()
    }

    pub fn n_inputs(&self) -> usize {
        self.inputs.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scalar_constructor_builds_single_column() {
        let data =
            RegressionData::from_scalar(array![1.0, 2.0, 3.0], array![2.0, 4.0, 6.0]).unwrap();

        assert_eq!(data.n_samples(), 3);
        assert_eq!(data.n_inputs(), 1);
        assert_eq!(data.inputs.column(0), array![1.0, 2.0, 3.0]);
    }

    #[test]
    // Purpose
    // -------
    // Each validation rule reports its own variant with the offending
    // position.
    fn rejects_invalid_samples() {
        assert_eq!(
            RegressionData::from_scalar(Array1::zeros(0), Array1::zeros(0)),
            Err(RegressionError::EmptySample)
        );
        assert_eq!(
            RegressionData::from_scalar(array![1.0, 2.0], array![1.0]),
            Err(RegressionError::LengthMismatch { inputs: 2, targets: 1 })
        );
        assert!(matches!(
            RegressionData::new(array![[1.0, f64::NAN]], array![1.0]),
            Err(RegressionError::NonFiniteInput { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            RegressionData::from_scalar(array![1.0, 2.0], array![1.0, f64::INFINITY]),
            Err(RegressionError::NonFiniteTarget { index: 1, .. })
        ));
        assert_eq!(
            RegressionData::new(Array2::zeros((2, 0)), array![1.0, 2.0]),
            Err(RegressionError::ZeroArity)
        );
    }
}
