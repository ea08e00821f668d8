//! Axis-wise reductions: mean, variance and standard deviation.
//!
//! Results are always a `1 x k` row vector, where `k` is the number of
//! columns (`Axis::PerColumn`), rows (`Axis::PerRow`) or `1` (`Axis::Whole`).
//! Whether a single value is handed to a host as a bare scalar is decided in
//! [`crate::boundary`], not here.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LinalgError, Result};
use crate::math::{vector, Matrix};

/// Which dimension a reduction collapses.
///
/// Host code passes `0`, `1` or "no axis"; see [`Axis::from_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Axis 0: reduce down each column, one result per column.
    PerColumn,
    /// Axis 1: reduce along each row, one result per row.
    PerRow,
    /// No axis: collapse the whole buffer to one value.
    Whole,
}

impl Axis {
    /// `Some(0)`, `Some(1)` or `None` for the whole matrix.
    pub fn from_index(index: Option<i64>) -> Result<Self> {
        match index {
            Some(0) => Ok(Axis::PerColumn),
            Some(1) => Ok(Axis::PerRow),
            None => Ok(Axis::Whole),
            Some(other) => Err(LinalgError::value(format!(
                "axis must be 0, 1 or omitted, got {}",
                other
            ))),
        }
    }

    pub fn index(self) -> Option<i64> {
        match self {
            Axis::PerColumn => Some(0),
            Axis::PerRow => Some(1),
            Axis::Whole => None,
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "per_column" => Ok(Axis::PerColumn),
            "1" | "per_row" => Ok(Axis::PerRow),
            "all" | "whole" | "none" => Ok(Axis::Whole),
            _ => Err(format!(
                "Unknown axis: {}. Expected 0, 1 or all",
                s
            )),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(i) => write!(f, "{}", i),
            None => write!(f, "all"),
        }
    }
}

/// Copy out the lanes a reduction along `axis` walks over.
pub(crate) fn lanes(a: &Matrix, axis: Axis) -> Vec<Vec<f64>> {
    match axis {
        Axis::PerColumn => a.transpose().to_rows(),
        Axis::PerRow => a.to_rows(),
        Axis::Whole => vec![a.to_vec()],
    }
}

/// Length of each lane along `axis`.
pub(crate) fn lane_len(a: &Matrix, axis: Axis) -> usize {
    match axis {
        Axis::PerColumn => a.nrows(),
        Axis::PerRow => a.ncols(),
        Axis::Whole => a.len(),
    }
}

fn reduce<F>(a: &Matrix, axis: Axis, mut f: F) -> Result<Matrix>
where
    F: FnMut(&[f64]) -> f64,
{
    let out: Vec<f64> = lanes(a, axis).iter().map(|lane| f(lane.as_slice())).collect();
    Matrix::from_vec(out)
}

pub fn mean(a: &Matrix, axis: Axis) -> Result<Matrix> {
    reduce(a, axis, vector::mean)
}

/// Sum of squared deviations over `N - dof`, `N` being the lane length.
///
/// `dof = 0` gives the population variance, `dof = 1` the sample variance.
pub fn var(a: &Matrix, dof: usize, axis: Axis) -> Result<Matrix> {
    let n = lane_len(a, axis);
    if n <= dof {
        return Err(LinalgError::value(format!(
            "degrees of freedom ({}) must be smaller than the reduced length ({})",
            dof, n
        )));
    }
    let denom = (n - dof) as f64;
    reduce(a, axis, |lane| {
        vector::sum_sq_dev(lane, vector::mean(lane)) / denom
    })
}

pub fn std(a: &Matrix, dof: usize, axis: Axis) -> Result<Matrix> {
    Ok(var(a, dof, axis)?.mapv(|v| v.sqrt()))
}
