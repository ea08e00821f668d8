//! Host-facing contract of the kernel.
//!
//! Interpreter bindings exchange nested (`Vec<Vec<f64>>`) and flat
//! (`Vec<f64>`) sequences with the kernel. This module owns the conversion
//! rules so every binding applies them the same way:
//!
//! * nested input becomes a row-major matrix, flat input a `1 x n` vector;
//! * a result with one row goes back as a flat sequence, anything else as
//!   nested rows;
//! * reductions that produce exactly one value go back as a bare scalar;
//! * errors are passed through untouched; [`LinalgError::kind`] names them.
//!
//! [`LinalgError::kind`]: crate::error::LinalgError::kind
use serde::{Deserialize, Serialize};

use crate::config::EigenConfig;
use crate::error::{LinalgError, Result};
use crate::math::Matrix;
use crate::reduction::Axis;
use crate::{arithmetic, eigen, ordering, reduction, regression, stats};

/// `"Version <major>.<minor>"`; patch releases do not change the contract.
pub const VERSION: &str = concat!(
    "Version ",
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR")
);

pub fn version() -> &'static str {
    VERSION
}

/// Array argument as received from a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostArray {
    Matrix(Vec<Vec<f64>>),
    Vector(Vec<f64>),
}

impl HostArray {
    pub fn is_vector(&self) -> bool {
        matches!(self, HostArray::Vector(_))
    }

    pub fn into_matrix(self) -> Result<Matrix> {
        match self {
            HostArray::Matrix(rows) => Matrix::from_rows(&rows),
            HostArray::Vector(values) => Matrix::from_vec(values),
        }
    }
}

impl From<Vec<f64>> for HostArray {
    fn from(values: Vec<f64>) -> Self {
        HostArray::Vector(values)
    }
}

impl From<Vec<Vec<f64>>> for HostArray {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        HostArray::Matrix(rows)
    }
}

/// Result handed back to a host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HostValue {
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl HostValue {
    /// One row goes back flat, anything else nested.
    pub fn from_matrix(m: Matrix) -> Self {
        if m.nrows() == 1 {
            HostValue::Vector(m.into_vec())
        } else {
            HostValue::Matrix(m.to_rows())
        }
    }

    /// Like [`HostValue::from_matrix`], but a single element becomes a scalar.
    pub fn reduction(m: Matrix) -> Self {
        if m.len() == 1 {
            HostValue::Scalar(m.as_slice()[0])
        } else {
            HostValue::from_matrix(m)
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            HostValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

/// Per-lane permutations handed back to a host. A single lane goes back
/// flat, mirroring [`HostValue::from_matrix`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HostIndices {
    Flat(Vec<usize>),
    Nested(Vec<Vec<usize>>),
}

impl From<Vec<Vec<usize>>> for HostIndices {
    fn from(mut lanes: Vec<Vec<usize>>) -> Self {
        if lanes.len() == 1 {
            HostIndices::Flat(lanes.remove(0))
        } else {
            HostIndices::Nested(lanes)
        }
    }
}

/// Eigen-decomposition as returned to a host: one eigenvector per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EigenPair {
    pub values: Vec<f64>,
    pub vectors: Vec<Vec<f64>>,
}

fn dof_from_host(dof: i64) -> Result<usize> {
    usize::try_from(dof).map_err(|_| {
        LinalgError::value(format!("degrees of freedom must be non-negative, got {}", dof))
    })
}

/// Flat host input is reduced as a whole whatever axis was asked for.
fn axis_for(input: &HostArray, axis: Option<i64>) -> Result<Axis> {
    let axis = Axis::from_index(axis)?;
    Ok(if input.is_vector() { Axis::Whole } else { axis })
}

pub fn dot_product(a: HostArray, v: HostArray) -> Result<HostValue> {
    let flat = v.is_vector();
    let out = arithmetic::dot(&a.into_matrix()?, &v.into_matrix()?)?;
    if flat && out.ncols() == 1 {
        return Ok(HostValue::Vector(out.into_vec()));
    }
    Ok(HostValue::from_matrix(out))
}

pub fn power(a: HostArray, p: i32) -> Result<HostValue> {
    arithmetic::power(&a.into_matrix()?, p).map(HostValue::from_matrix)
}

pub fn subtract(a: HostArray, b: HostArray) -> Result<HostValue> {
    arithmetic::subtract(&a.into_matrix()?, &b.into_matrix()?).map(HostValue::from_matrix)
}

pub fn divide(a: HostArray, n: f64) -> Result<HostValue> {
    arithmetic::divide(&a.into_matrix()?, n).map(HostValue::from_matrix)
}

pub fn sum(a: HostArray) -> Result<f64> {
    Ok(arithmetic::sum(&a.into_matrix()?))
}

pub fn transpose(a: HostArray) -> Result<HostValue> {
    Ok(HostValue::from_matrix(arithmetic::transpose(&a.into_matrix()?)))
}

pub fn sigmoid(a: HostArray) -> Result<HostValue> {
    Ok(HostValue::from_matrix(arithmetic::sigmoid(&a.into_matrix()?)))
}

pub fn least_squares(x: HostArray, y: HostArray) -> Result<Vec<f64>> {
    let theta = regression::least_squares(&x.into_matrix()?, &y.into_matrix()?)?;
    Ok(theta.into_vec())
}

pub fn mean(a: HostArray, axis: Option<i64>) -> Result<HostValue> {
    let axis = axis_for(&a, axis)?;
    reduction::mean(&a.into_matrix()?, axis).map(HostValue::reduction)
}

pub fn std(a: HostArray, dof: i64, axis: Option<i64>) -> Result<HostValue> {
    let axis = axis_for(&a, axis)?;
    let dof = dof_from_host(dof)?;
    reduction::std(&a.into_matrix()?, dof, axis).map(HostValue::reduction)
}

pub fn variance(a: HostArray, dof: i64, axis: Option<i64>) -> Result<HostValue> {
    let axis = axis_for(&a, axis)?;
    let dof = dof_from_host(dof)?;
    reduction::var(&a.into_matrix()?, dof, axis).map(HostValue::reduction)
}

pub fn covariance(a: HostArray) -> Result<HostValue> {
    stats::cov(&a.into_matrix()?).map(HostValue::from_matrix)
}

/// Best-effort Jacobi decomposition packaged for a host.
pub fn eigen_solve(a: HostArray, tolerance: f64, max_iterations: usize) -> Result<EigenPair> {
    eigen_solve_with(a, &EigenConfig::new(tolerance, max_iterations))
}

pub fn eigen_solve_with(a: HostArray, config: &EigenConfig) -> Result<EigenPair> {
    let eig = eigen::jacobi(&a.into_matrix()?, config)?;
    Ok(EigenPair {
        values: eig.values,
        vectors: eig.vectors.to_rows(),
    })
}

/// One index per lane, always a list; a flat input gives a one-element list.
pub fn argmax(a: HostArray, axis: Option<i64>) -> Result<Vec<usize>> {
    let axis = axis_for(&a, axis)?;
    ordering::argmax(&a.into_matrix()?, axis)
}

pub fn argmin(a: HostArray, axis: Option<i64>) -> Result<Vec<usize>> {
    let axis = axis_for(&a, axis)?;
    ordering::argmin(&a.into_matrix()?, axis)
}

pub fn sort(a: HostArray, axis: Option<i64>) -> Result<HostValue> {
    let axis = axis_for(&a, axis)?;
    ordering::sort(&a.into_matrix()?, axis).map(HostValue::from_matrix)
}

pub fn argsort(a: HostArray, axis: Option<i64>) -> Result<HostIndices> {
    let axis = axis_for(&a, axis)?;
    ordering::argsort(&a.into_matrix()?, axis).map(HostIndices::from)
}

pub fn max_occurrence(a: HostArray) -> Result<f64> {
    ordering::max_occurrence(&a.into_matrix()?)
}
