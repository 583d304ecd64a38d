//! Sample preprocessors applied to scalar `(x, y)` data before fitting.
//!
//! Purpose
//! -------
//! Offer optional, model-independent data reduction steps that run before a
//! trimmed fit. They operate on scalar inputs only and return a new sample
//! set; the model never calls them implicitly.
//!
//! Key behaviors
//! -------------
//! - [`NullPreprocessor`] returns its input unchanged.
//! - [`MeanKernelPreprocessor`] slides a rectangular kernel of size
//!   `(kx, ky)` with strides `(sx, sy)` over the sample cloud. A sample at
//!   `(x, y)` belongs to every kernel `(ix, iy)` with
//!   `ceil((x − x_min)/sx) ≤ ix ≤ floor((x − x_min + kx)/sx)` (same for `y`).
//!   Each kernel holding at least `ceil(N·threshold)` samples emits one point:
//!   the mean of its members.
//! - [`ClusteringPreprocessor`] runs DBSCAN on the points `(x, y)` and keeps
//!   only the samples it labels as noise, in input order. A point is a core
//!   point when at least `min_samples` points (itself included) lie within
//!   Euclidean distance `eps`; clusters grow from core points through their
//!   neighborhoods, and everything unreachable is noise.
//!
//! Invariants & assumptions
//! ------------------------
//! - Kernel sizes and strides are finite and > 0; the threshold lies in
//!   `[0, 1]`. Checked in [`MeanKernelPreprocessor::new`].
//! - Output points are ordered by kernel index `(ix, iy)`, so the result does
//!   not depend on hashing.
//! - DBSCAN labels are assigned in input order: cluster `0` grows from the
//!   first core point, and border points join the first cluster reaching
//!   them.
//! - Inputs must be non-empty with matching lengths.
//!
//! Testing notes
//! -------------
//! - Unit tests work through a four-point example by hand, cover the
//!   all-covering kernel at threshold 1, and check parameter validation.
//! - DBSCAN tests pin labels for separated groups, border points, the
//!   inclusive radius, and the noise-only filtering.
use crate::regression::{
    core::data::RegressionData,
    errors::{RegressionError, RegressionResult},
};
use ndarray::{Array1, ArrayView1};
use std::collections::BTreeMap;

/// Transformation of a scalar sample set.
pub trait Preprocessor {
    /// Map `(x, y)` to a new sample set.
    fn apply(
        &self, x: ArrayView1<f64>, y: ArrayView1<f64>,
    ) -> RegressionResult<(Array1<f64>, Array1<f64>)>;

    /// Apply to validated scalar training data.
    ///
    /// # Errors
    /// - [`RegressionError::InputArityMismatch`] if the data are not scalar.
    /// - Any error from [`apply`](Self::apply) or [`RegressionData::from_scalar`]
    ///   (for instance `EmptySample` when every kernel falls below threshold).
    fn apply_data(&self, data: &RegressionData) -> RegressionResult<RegressionData> {
        if data.n_inputs() != 1 {
            let found = data.n_inputs();
            return Err(RegressionError::InputArityMismatch { expected: 1, found });
        }
        let (x, y) = self.apply(data.inputs.column(0), data.targets.view())?;
        RegressionData::from_scalar(x, y)
    }
}

/// Identity preprocessor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NullPreprocessor;

impl Preprocessor for NullPreprocessor {
    fn apply(
        &self, x: ArrayView1<f64>, y: ArrayView1<f64>,
    ) -> RegressionResult<(Array1<f64>, Array1<f64>)> {
        check_pair(x, y)?;
        Ok((x.to_owned(), y.to_owned()))
    }
}

/// Grid-kernel averaging preprocessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanKernelPreprocessor {
    kernel_size: (f64, f64),
    strides: (f64, f64),
    threshold: f64,
}

impl MeanKernelPreprocessor {
    /// # Errors
    /// - [`RegressionError::InvalidKernelSize`] / [`RegressionError::InvalidStride`]
    ///   for non-finite or non-positive sizes.
    /// - [`RegressionError::InvalidThreshold`] if `threshold ∉ [0, 1]`.
    pub fn new(
        kernel_size: (f64, f64), strides: (f64, f64), threshold: f64,
    ) -> RegressionResult<Self> {
        for value in [kernel_size.0, kernel_size.1] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RegressionError::InvalidKernelSize {
                    value,
                    reason: "must be finite and strictly positive",
                });
            }
        }
        for value in [strides.0, strides.1] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RegressionError::InvalidStride {
                    value,
                    reason: "must be finite and strictly positive",
                });
            }
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RegressionError::InvalidThreshold {
                value: threshold,
                reason: "must lie in [0, 1]",
            });
        }
        Ok(Self { kernel_size, strides, threshold })
    }

    /// Same kernel size and stride on both axes.
    pub fn square(kernel_size: f64, stride: f64, threshold: f64) -> RegressionResult<Self> {
        Self::new((kernel_size, kernel_size), (stride, stride), threshold)
    }
}

impl Preprocessor for MeanKernelPreprocessor {
    fn apply(
        &self, x: ArrayView1<f64>, y: ArrayView1<f64>,
    ) -> RegressionResult<(Array1<f64>, Array1<f64>)> {
        check_pair(x, y)?;
        let x_min = x.fold(f64::INFINITY, |m, &v| m.min(v));
        let y_min = y.fold(f64::INFINITY, |m, &v| m.min(v));

        // (sum_x, sum_y, count) per kernel index.
        let mut kernels: BTreeMap<(i64, i64), (f64, f64, usize)> = BTreeMap::new();
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            let (ix_low, ix_high) = cover(xi - x_min, self.kernel_size.0, self.strides.0);
            let (iy_low, iy_high) = cover(yi - y_min, self.kernel_size.1, self.strides.1);
            for ix in ix_low..=ix_high {
                for iy in iy_low..=iy_high {
                    let slot = kernels.entry((ix, iy)).or_insert((0.0, 0.0, 0));
                    slot.0 += xi;
                    slot.1 += yi;
                    slot.2 += 1;
                }
            }
        }

        let min_count = (x.len() as f64 * self.threshold).ceil() as usize;
        let (new_x, new_y): (Vec<f64>, Vec<f64>) = kernels
            .values()
            .filter(|(_, _, count)| *count >= min_count)
            .map(|&(sx, sy, count)| (sx / count as f64, sy / count as f64))
            .unzip();
        Ok((Array1::from(new_x), Array1::from(new_y)))
    }
}

/// DBSCAN-based sample filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringPreprocessor {
    eps: f64,
    min_samples: usize,
}

impl ClusteringPreprocessor {
    /// # Errors
    /// - [`RegressionError::InvalidClusterRadius`] for a non-finite or
    ///   non-positive `eps`.
    /// - [`RegressionError::InvalidMinSamples`] if `min_samples == 0`.
    pub fn new(eps: f64, min_samples: usize) -> RegressionResult<Self> {
        if !eps.is_finite() || eps <= 0.0 {
            return Err(RegressionError::InvalidClusterRadius {
                value: eps,
                reason: "must be finite and strictly positive",
            });
        }
        if min_samples == 0 {
            return Err(RegressionError::InvalidMinSamples {
                min_samples,
                reason: "must be at least 1",
            });
        }
        Ok(Self { eps, min_samples })
    }

    /// Cluster label of every sample; `None` marks noise.
    pub fn labels(
        &self, x: ArrayView1<f64>, y: ArrayView1<f64>,
    ) -> RegressionResult<Vec<Option<usize>>> {
        check_pair(x, y)?;
        let n = x.len();
        let eps_sq = self.eps * self.eps;
        let neighbors: Vec<Vec<usize>> = (0..n)
            .map(|i| {
                (0..n)
                    .filter(|&j| (x[i] - x[j]).powi(2) + (y[i] - y[j]).powi(2) <= eps_sq)
                    .collect()
            })
            .collect();
        let is_core: Vec<bool> =
            neighbors.iter().map(|hood| hood.len() >= self.min_samples).collect();

        let mut labels = vec![None; n];
        let mut cluster = 0;
        for seed in 0..n {
            if labels[seed].is_some() || !is_core[seed] {
                continue;
            }
            labels[seed] = Some(cluster);
            let mut frontier = vec![seed];
            while let Some(point) = frontier.pop() {
                if !is_core[point] {
                    continue;
                }
                for &next in &neighbors[point] {
                    if labels[next].is_none() {
                        labels[next] = Some(cluster);
                        frontier.push(next);
                    }
                }
            }
            cluster += 1;
        }
        Ok(labels)
    }
}

impl Preprocessor for ClusteringPreprocessor {
    fn apply(
        &self, x: ArrayView1<f64>, y: ArrayView1<f64>,
    ) -> RegressionResult<(Array1<f64>, Array1<f64>)> {
        let labels = self.labels(x, y)?;
        let (new_x, new_y): (Vec<f64>, Vec<f64>) = labels
            .iter()
            .zip(x.iter().zip(y.iter()))
            .filter_map(|(label, (&xi, &yi))| label.is_none().then_some((xi, yi)))
            .unzip();
        Ok((Array1::from(new_x), Array1::from(new_y)))
    }
}

// ---- Helper Methods ----

fn check_pair(x: ArrayView1<f64>, y: ArrayView1<f64>) -> RegressionResult<()> {
    if x.len() != y.len() {
        return Err(RegressionError::LengthMismatch { inputs: x.len(), targets: y.len() });
    }
    if x.is_empty() {
        return Err(RegressionError::EmptySample);
    }
    Ok(())
}

/// Inclusive range of kernel indices covering an offset from the minimum.
fn cover(offset: f64, kernel: f64, stride: f64) -> (i64, i64) {
    ((offset / stride).ceil() as i64, ((offset + kernel) / stride).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn null_preprocessor_is_identity() {
        let x = array![3.0, 1.0, 2.0];
        let y = array![-1.0, 0.0, 5.0];

        let (nx, ny) = NullPreprocessor.apply(x.view(), y.view()).unwrap();

        assert_eq!(nx, x);
        assert_eq!(ny, y);
    }

    #[test]
    // Purpose
    // -------
    // Work one grid by hand.
    //
    // Given
    // -----
    // Points (0, 0), (0.1, 0.1), (1.0, 1.0), (1.1, 1.1); kernel 0.5, stride
    // 0.5, threshold 0.5 (at least 2 members).
    //
    // Expect
    // ------
    // Only kernels (1, 1) and (3, 3) hold two points, giving the means
    // (0.05, 0.05) and (1.05, 1.05) in that order.
    fn mean_kernel_averages_dense_cells() {
        let x = array![0.0, 0.1, 1.0, 1.1];
        let y = x.clone();
        let pre = MeanKernelPreprocessor::square(0.5, 0.5, 0.5).unwrap();

        let (nx, ny) = pre.apply(x.view(), y.view()).unwrap();

        assert_eq!(nx.len(), 2);
        assert_relative_eq!(nx[0], 0.05);
        assert_relative_eq!(nx[1], 1.05);
        assert_relative_eq!(ny[0], 0.05);
        assert_relative_eq!(ny[1], 1.05);
    }

    #[test]
    // Purpose
    // -------
    // With threshold 1 only a kernel covering every sample survives; a wide
    // kernel produces the global mean.
    fn full_threshold_keeps_covering_kernel_only() {
        let x = array![0.0, 0.1, 1.0, 1.1];
        let y = array![2.0, 2.0, 4.0, 4.0];
        let pre = MeanKernelPreprocessor::square(10.0, 10.0, 1.0).unwrap();

        let (nx, ny) = pre.apply(x.view(), y.view()).unwrap();

        assert_eq!(nx.len(), 1);
        assert_relative_eq!(nx[0], 0.55);
        assert_relative_eq!(ny[0], 3.0);
    }

    #[test]
    fn applies_to_scalar_regression_data() {
        let data =
            RegressionData::from_scalar(array![0.0, 0.1, 1.0, 1.1], array![0.0, 0.1, 1.0, 1.1])
                .unwrap();
        let pre = MeanKernelPreprocessor::square(0.5, 0.5, 0.5).unwrap();

        let reduced = pre.apply_data(&data).unwrap();

        assert_eq!(reduced.n_samples(), 2);
        assert_eq!(reduced.n_inputs(), 1);
    }

    #[test]
    fn rejects_invalid_parameters_and_inputs() {
        assert!(matches!(
            MeanKernelPreprocessor::new((0.0, 1.0), (1.0, 1.0), 0.5),
            Err(RegressionError::InvalidKernelSize { .. })
        ));
        assert!(matches!(
            MeanKernelPreprocessor::new((1.0, 1.0), (1.0, f64::NAN), 0.5),
            Err(RegressionError::InvalidStride { .. })
        ));
        assert!(matches!(
            MeanKernelPreprocessor::square(1.0, 1.0, 1.5),
            Err(RegressionError::InvalidThreshold { .. })
        ));
        assert_eq!(
            NullPreprocessor.apply(array![1.0].view(), array![1.0, 2.0].view()),
            Err(RegressionError::LengthMismatch { inputs: 1, targets: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Separated groups get their own labels and isolated points are noise;
    // filtering keeps the noise points in input order.
    //
    // Given
    // -----
    // Group A around the origin (three points), group B near (5, 5) (two
    // points), isolated points (10, 0) and (−3, 7); eps = 0.5, min_samples = 2.
    fn dbscan_labels_groups_and_keeps_noise() {
        let x = array![0.0, 10.0, 0.1, 5.0, 0.0, 5.1, -3.0];
        let y = array![0.0, 0.0, 0.0, 5.0, 0.1, 5.0, 7.0];
        let pre = ClusteringPreprocessor::new(0.5, 2).unwrap();

        let labels = pre.labels(x.view(), y.view()).unwrap();
        let (nx, ny) = pre.apply(x.view(), y.view()).unwrap();

        assert_eq!(labels, vec![Some(0), None, Some(0), Some(1), Some(0), Some(1), None]);
        assert_eq!(nx, array![10.0, -3.0]);
        assert_eq!(ny, array![0.0, 7.0]);
    }

    #[test]
    // Purpose
    // -------
    // Border points reached from a core point join its cluster even though
    // their own neighborhoods are too small.
    //
    // Given
    // -----
    // (0, 0), (0.4, 0), (0.8, 0), (5, 5) with eps = 0.5 and min_samples = 3:
    // only the middle point is core.
    fn dbscan_border_points_are_not_noise() {
        let x = array![0.0, 0.4, 0.8, 5.0];
        let y = array![0.0, 0.0, 0.0, 5.0];
        let pre = ClusteringPreprocessor::new(0.5, 3).unwrap();

        let labels = pre.labels(x.view(), y.view()).unwrap();
        let (nx, ny) = pre.apply(x.view(), y.view()).unwrap();

        assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);
        assert_eq!(nx, array![5.0]);
        assert_eq!(ny, array![5.0]);
    }

    #[test]
    // Purpose
    // -------
    // The radius is inclusive, and `min_samples = 1` makes every point a
    // core point.
    //
    // Expect
    // ------
    // No noise survives, so `apply_data` reports an empty sample.
    fn dbscan_inclusive_radius_and_singleton_cores() {
        let x = array![0.0, 1.0];
        let y = array![0.0, 0.0];

        let pair = ClusteringPreprocessor::new(1.0, 2).unwrap();
        assert_eq!(pair.labels(x.view(), y.view()).unwrap(), vec![Some(0), Some(0)]);

        let singletons = ClusteringPreprocessor::new(0.1, 1).unwrap();
        assert_eq!(singletons.labels(x.view(), y.view()).unwrap(), vec![Some(0), Some(1)]);

        let data = RegressionData::from_scalar(x, y).unwrap();
        assert_eq!(pair.apply_data(&data), Err(RegressionError::EmptySample));
    }

    #[test]
    fn dbscan_rejects_invalid_parameters() {
        assert!(matches!(
            ClusteringPreprocessor::new(0.0, 2),
            Err(RegressionError::InvalidClusterRadius { .. })
        ));
        assert!(matches!(
            ClusteringPreprocessor::new(f64::INFINITY, 2),
            Err(RegressionError::InvalidClusterRadius { .. })
        ));
        assert!(matches!(
            ClusteringPreprocessor::new(0.5, 0),
            Err(RegressionError::InvalidMinSamples { min_samples: 0, .. })
        ));
        assert_eq!(
            ClusteringPreprocessor::new(0.5, 2)
                .unwrap()
                .apply(Array1::<f64>::zeros(0).view(), Array1::<f64>::zeros(0).view()),
            Err(RegressionError::EmptySample)
        );
    }
}
