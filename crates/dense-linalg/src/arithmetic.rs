//! Elementwise arithmetic and products.
//!
//! Every function validates shapes first and returns a newly allocated
//! `Matrix`; inputs are never modified.
use crate::error::{LinalgError, Result};
use crate::math::shape::{self, ProductShape};
use crate::math::{vector, Matrix};

/// Matrix product `a . b`.
///
/// A `1 x n` right operand with `n == a.ncols()` is read as a column vector,
/// giving an `a.nrows() x 1` result.
pub fn dot(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let (rows, inner) = a.shape();
    match shape::product_shape(a, b)? {
        ProductShape::RowAsColumn => {
            let v = b.as_slice();
            let data = a.rows().map(|row| vector::dot(row, v)).collect();
            Matrix::from_shape_vec((rows, 1), data)
        }
        ProductShape::Matrix => {
            let cols = b.ncols();
            // Walk b by columns once so each output cell is a contiguous dot.
            let bt = transpose(b);
            let mut data = Vec::with_capacity(rows * cols);
            for row in a.rows() {
                for col in bt.rows() {
                    debug_assert_eq!(col.len(), inner);
                    data.push(vector::dot(row, col));
                }
            }
            Matrix::from_shape_vec((rows, cols), data)
        }
    }
}

/// Elementwise integer power. `0^p` with `p < 0` is a `DivideByZero` error.
pub fn power(a: &Matrix, p: i32) -> Result<Matrix> {
    if p < 0 && a.as_slice().iter().any(|&v| v == 0.0) {
        return Err(LinalgError::DivideByZero);
    }
    Ok(a.mapv(|v| v.powi(p)))
}

pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    shape::ensure_same_shape(a, b)?;
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x - y)
        .collect();
    Matrix::from_shape_vec(a.shape(), data)
}

/// Divide every element by `n`. Zero is rejected up front rather than
/// producing infinities.
pub fn divide(a: &Matrix, n: f64) -> Result<Matrix> {
    shape::ensure_nonzero(n)?;
    Ok(a.mapv(|v| v / n))
}

pub fn sum(a: &Matrix) -> f64 {
    vector::sum(a.as_slice())
}

pub fn transpose(a: &Matrix) -> Matrix {
    a.transpose()
}

/// Elementwise logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(a: &Matrix) -> Matrix {
    a.mapv(|v| 1.0 / (1.0 + (-v).exp()))
}
