//! TrimmedRegressor — polynomial regression fitted by trimmed MBGD.
//!
//! The model owns its configuration and, after a successful `fit`, the
//! feature transformer and the optimizer outcome (weights + fit summary).
//! Fitting builds the design matrix once, wraps it in a [`BatchObjective`]
//! whose batch gradient is the trimmed estimator, and hands it to
//! [`minimize_with_rng`].
//!
//! A new `fit` discards the previous result before doing anything else, so a
//! failed fit leaves the model unfitted.
use crate::{
    optimization::{
        errors::OptResult,
        mbgd::{minimize_with_rng, BatchEstimate, BatchObjective, FitState, OptimOutcome, Weights},
    },
    regression::{
        core::{
            data::RegressionData,
            features::PolynomialFeatures,
            loss::LossKind,
            options::RegressionOptions,
            trim::{trim_count, trimmed_gradient, trimmed_loss},
        },
        errors::{RegressionError, RegressionResult},
    },
};
use ndarray::{aview1, Array1, Array2, ArrayView1, ArrayView2};
use rand::RngCore;

/// Robust polynomial regressor.
///
/// `results` is `None` until a `fit` completes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedRegressor {
    /// Model configuration.
    pub options: RegressionOptions,
    /// Feature transformer of the last successful fit.
    features: Option<PolynomialFeatures>,
    /// Fit summary of the last successful fit.
    pub results: Option<OptimOutcome>,
}

impl TrimmedRegressor {
    pub fn new(options: RegressionOptions) -> Self {
        Self { options, features: None, results: None }
    }

    /// Fit on `data`, sampling batches from the configured seed (or from
    /// entropy when no seed is set).
    ///
    /// # Errors
    /// See [`fit_with_rng`](Self::fit_with_rng).
    pub fn fit(&mut self, data: &RegressionData) -> RegressionResult<&OptimOutcome> {
        let rng = self.options.mbgd.make_rng();
        self.fit_with_rng(data, rng)
    }

    /// Fit on `data`, drawing the initial weights and every batch from `rng`.
    ///
    /// Returns the fit summary; reaching `max_iter` is reported through
    /// `FitState::MaxIterReached`, not as an error.
    ///
    /// # Errors
    /// - Any error from [`RegressionOptions::validate`]; the options are
    ///   re-checked because their fields are public.
    /// - [`RegressionError::BatchSizeExceedsSamples`] if `B > N`.
    /// - [`RegressionError::InvalidTrimCount`] if `floor(ε·B) ≥ B`.
    /// - [`RegressionError::Optimization`] for optimizer failures such as a
    ///   non-finite gradient.
    pub fn fit_with_rng<R>(
        &mut self, data: &RegressionData, mut rng: R,
    ) -> RegressionResult<&OptimOutcome>
    where
        R: RngCore + Send + 'static,
    {
        self.features = None;
        self.results = None;

        let opts = &self.options;
        opts.validate()?;
        let n_samples = data.n_samples();
        let batch_size = opts.mbgd.batch_size;
        if batch_size > n_samples {
            return Err(RegressionError::BatchSizeExceedsSamples { batch_size, n_samples });
        }
        trim_count(opts.contamination, batch_size)?;

        let features = PolynomialFeatures::new(opts.degree, data.n_inputs())?;
        let objective = TrimmedObjective {
            design: features.transform_batch(data.inputs.view())?,
            targets: data.targets.view(),
            loss: opts.loss,
            contamination: opts.contamination,
        };
        let w0 = opts.mbgd.init.draw(features.n_output_features(), &mut rng);
        let outcome = minimize_with_rng(&objective, w0, &opts.mbgd, rng)?;

        self.features = Some(features);
        Ok(&*self.results.insert(outcome))
    }

    /// Prediction `w·φ(input)` for one raw input.
    ///
    /// # Errors
    /// - [`RegressionError::ModelNotFitted`] before a completed `fit`.
    /// - [`RegressionError::InputArityMismatch`] for inputs of the wrong width.
    pub fn predict(&self, input: ArrayView1<f64>) -> RegressionResult<f64> {
        let (features, weights) = self.fitted()?;
        Ok(features.transform(input)?.dot(weights))
    }

    /// Prediction for a scalar input (`d = 1`).
    pub fn predict_scalar(&self, x: f64) -> RegressionResult<f64> {
        self.predict(aview1(&[x]))
    }

    /// Predictions for every row of `inputs` (`N × d`).
    pub fn predict_batch(&self, inputs: ArrayView2<f64>) -> RegressionResult<Array1<f64>> {
        let (features, weights) = self.fitted()?;
        Ok(features.transform_batch(inputs)?.dot(weights))
    }

    /// Learned weights, bias first, in the feature transformer's order.
    pub fn weights(&self) -> RegressionResult<&Weights> {
        self.fitted().map(|(_, w)| w)
    }

    pub fn features(&self) -> Option<&PolynomialFeatures> {
        self.features.as_ref()
    }

    /// Lifecycle state: `Initialized` until a fit completes, then the
    /// terminal state of the last fit.
    pub fn state(&self) -> FitState {
        self.results.as_ref().map_or(FitState::Initialized, |r| r.state)
    }

    fn fitted(&self) -> RegressionResult<(&PolynomialFeatures, &Weights)> {
        match (&self.features, &self.results) {
            (Some(features), Some(results)) => Ok((features, &results.weights)),
            _ => Err(RegressionError::ModelNotFitted),
        }
    }
}

/// Design matrix and targets seen through the trimmed estimator.
struct TrimmedObjective<'a> {
    design: Array2<f64>,
    targets: ArrayView1<'a, f64>,
    loss: LossKind,
    contamination: f64,
}

impl BatchObjective for TrimmedObjective<'_> {
    fn n_samples(&self) -> usize {
        self.design.nrows()
    }

    fn dim(&self) -> usize {
        self.design.ncols()
    }

    fn value(&self, weights: &Weights) -> OptResult<f64> {
        Ok(trimmed_loss(
            self.design.view(),
            self.targets,
            weights.view(),
            self.loss,
            self.contamination,
        )?)
    }

    fn batch_gradient(&self, weights: &Weights, batch: &[usize]) -> OptResult<BatchEstimate> {
        Ok(trimmed_gradient(
            self.design.view(),
            self.targets,
            weights.view(),
            batch,
            self.loss,
            self.contamination,
        )?)
    }
}
