//! Trimmed gradient estimator.
//!
//! Purpose
//! -------
//! Turn one batch of design-matrix rows into a single gradient estimate that
//! ignores the batch's worst-fitting samples. This is the only place where
//! the robust part of the fit happens; the optimizer only sees the result.
//!
//! Key behaviors
//! -------------
//! - [`trim_count`] computes `k = floor(ε·B)` and rejects `k ≥ B`. Products
//!   within rounding noise of an integer count as that integer.
//! - [`trimmed_gradient`] ranks the batch by per-sample loss (descending),
//!   drops the first `k`, and averages `gradient_factor(r)·φ` over the rest.
//! - [`trimmed_loss`] applies the same ranking rule to a whole data set and
//!   returns the mean kept loss (the reported training loss).
//!
//! Invariants & assumptions
//! ------------------------
//! - Ranking uses a stable sort on `f64::total_cmp`, so equal losses keep
//!   their batch order and the first positions are dropped first. Results are
//!   therefore reproducible for a fixed batch sequence.
//! - Contributions are summed in **batch order**, then divided by `B − k`.
//!   The ranking only decides membership, never summation order, so `ε = 0`
//!   runs the identical arithmetic of plain mini-batch gradient descent.
//! - At least one sample always contributes.
//!
//! Conventions
//! -----------
//! - `residual = φ·w − y`.
//! - Batch indices are row positions into `design` / `targets`.
//!
//! Testing notes
//! -------------
//! - Unit tests pin `k` for boundary values of ε and B, check the tie rule
//!   on a hand-built batch, show that an outlier is excluded, and compare the
//!   untrimmed gradient against a finite-difference derivative of the mean
//!   loss.
use crate::{
    optimization::mbgd::BatchEstimate,
    regression::{
        core::loss::LossKind,
        errors::{RegressionError, RegressionResult},
    },
};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Number of samples discarded from a batch of `batch_size`.
///
/// # Errors
/// - [`RegressionError::InvalidTrimCount`] if `floor(ε·B) ≥ B` (this also
///   covers `B = 0`).
pub fn trim_count(contamination: f64, batch_size: usize) -> RegressionResult<usize> {
    let scaled = contamination * batch_size as f64;
    // Products such as 0.29·100 land a few ulps below the integer they denote.
    let nearest = scaled.round();
    let trim = if (scaled - nearest).abs() <= 1e-9 * nearest.max(1.0) {
        nearest as usize
    } else {
        scaled.floor() as usize
    };
    if trim >= batch_size {
        return Err(RegressionError::InvalidTrimCount { trim, batch_size });
    }
    Ok(trim)
}

/// Trimmed mean gradient of `loss` over the rows listed in `batch`.
///
/// Steps:
/// 1. residual and loss for every batch member,
/// 2. rank by loss descending (stable),
/// 3. drop the first `k = floor(ε·B)`,
/// 4. sum `gradient_factor(r)·φ` over the kept members in batch order,
/// 5. divide by `B − k`.
///
/// The returned [`BatchEstimate`] also carries the mean kept loss and the
/// kept / trimmed counts.
///
/// # Errors
/// - [`RegressionError::InvalidTrimCount`] when no sample would be kept.
pub fn trimmed_gradient(
    design: ArrayView2<f64>, targets: ArrayView1<f64>, weights: ArrayView1<f64>, batch: &[usize],
    loss: LossKind, contamination: f64,
) -> RegressionResult<BatchEstimate> {
    let trim = trim_count(contamination, batch.len())?;

    let residuals: Vec<f64> =
        batch.iter().map(|&row| design.row(row).dot(&weights) - targets[row]).collect();
    let losses: Vec<f64> = residuals.iter().map(|&r| loss.loss(r)).collect();
    let keep = keep_mask(&losses, trim);

    let mut gradient = Array1::<f64>::zeros(weights.len());
    let mut loss_sum = 0.0;
    for (pos, &row) in batch.iter().enumerate() {
        if !keep[pos] {
            continue;
        }
        gradient.scaled_add(loss.gradient_factor(residuals[pos]), &design.row(row));
        loss_sum += losses[pos];
    }
    let kept = batch.len() - trim;
    gradient /= kept as f64;

    Ok(BatchEstimate { gradient, loss: loss_sum / kept as f64, kept, trimmed: trim })
}

/// Mean loss over all rows after discarding the `floor(ε·N)` largest.
///
/// # Errors
/// - [`RegressionError::InvalidTrimCount`] when no row would be kept
///   (including an empty design).
pub fn trimmed_loss(
    design: ArrayView2<f64>, targets: ArrayView1<f64>, weights: ArrayView1<f64>, loss: LossKind,
    contamination: f64,
) -> RegressionResult<f64> {
    let n = design.nrows();
    let trim = trim_count(contamination, n)?;
    let losses: Vec<f64> = design
        .outer_iter()
        .zip(targets.iter())
        .map(|(row, &y)| loss.loss(row.dot(&weights) - y))
        .collect();
    let keep = keep_mask(&losses, trim);
    let total: f64 = losses.iter().zip(&keep).filter_map(|(l, &k)| k.then_some(*l)).sum();
    Ok(total / (n - trim) as f64)
}

// ---- Helper Methods ----

/// `keep[i] == false` for the `trim` largest losses; ties drop the earlier
/// position first.
fn keep_mask(losses: &[f64], trim: usize) -> Vec<bool> {
    let mut keep = vec![true; losses.len()];
    let mut order: Vec<usize> = (0..losses.len()).collect();
    order.sort_by(|&a, &b| losses[b].total_cmp(&losses[a]));
    for &pos in &order[..trim] {
        keep[pos] = false;
    }
    keep
}
