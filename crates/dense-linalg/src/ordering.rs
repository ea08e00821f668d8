//! Order statistics along an axis: arg-extrema, sorting and the mode.
//!
//! Lanes are chosen exactly as in [`crate::reduction`]. NaN has no place in
//! an ordering, so any NaN in the input is a `Value` error.
use std::collections::HashMap;

use crate::error::{LinalgError, Result};
use crate::math::Matrix;
use crate::reduction::{lanes, Axis};

fn ensure_no_nan(a: &Matrix) -> Result<()> {
    if a.as_slice().iter().any(|v| v.is_nan()) {
        return Err(LinalgError::value("cannot order values containing NaN"));
    }
    Ok(())
}

/// Index of the first element in `lane` preferred by `better`.
fn arg_by<F>(lane: &[f64], better: F) -> usize
where
    F: Fn(f64, f64) -> bool,
{
    let mut best = 0;
    for (i, &v) in lane.iter().enumerate().skip(1) {
        if better(v, lane[best]) {
            best = i;
        }
    }
    best
}

/// Position of the largest element of each lane. Ties keep the first.
pub fn argmax(a: &Matrix, axis: Axis) -> Result<Vec<usize>> {
    ensure_no_nan(a)?;
    Ok(lanes(a, axis)
        .iter()
        .map(|lane| arg_by(lane, |v, best| v > best))
        .collect())
}

/// Position of the smallest element of each lane. Ties keep the first.
pub fn argmin(a: &Matrix, axis: Axis) -> Result<Vec<usize>> {
    ensure_no_nan(a)?;
    Ok(lanes(a, axis)
        .iter()
        .map(|lane| arg_by(lane, |v, best| v < best))
        .collect())
}

/// Stable ascending permutation of each lane.
pub fn argsort(a: &Matrix, axis: Axis) -> Result<Vec<Vec<usize>>> {
    ensure_no_nan(a)?;
    Ok(lanes(a, axis)
        .iter()
        .map(|lane| {
            let mut idx: Vec<usize> = (0..lane.len()).collect();
            idx.sort_by(|&i, &j| lane[i].total_cmp(&lane[j]));
            idx
        })
        .collect())
}

/// Sort each lane ascending.
///
/// `PerColumn` and `PerRow` keep the input shape; `Whole` returns the sorted
/// buffer as a `1 x len` row vector.
pub fn sort(a: &Matrix, axis: Axis) -> Result<Matrix> {
    ensure_no_nan(a)?;
    let mut sorted = lanes(a, axis);
    for lane in sorted.iter_mut() {
        lane.sort_by(f64::total_cmp);
    }
    match axis {
        Axis::PerRow | Axis::Whole => Matrix::from_rows(&sorted),
        Axis::PerColumn => Ok(Matrix::from_rows(&sorted)?.transpose()),
    }
}

/// Most frequent value. Ties go to the value seen first.
pub fn max_occurrence(a: &Matrix) -> Result<f64> {
    ensure_no_nan(a)?;
    let mut counts: HashMap<u64, (usize, usize)> = HashMap::new();
    for (pos, &v) in a.as_slice().iter().enumerate() {
        // Fold -0.0 into 0.0 so both count as one value.
        let key = if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
        counts.entry(key).or_insert((0, pos)).0 += 1;
    }
    let (bits, _) = counts
        .into_iter()
        .max_by(|(_, (ca, pa)), (_, (cb, pb))| ca.cmp(cb).then(pb.cmp(pa)))
        .ok_or_else(|| LinalgError::value("empty matrix has no mode"))?;
    Ok(f64::from_bits(bits))
}
