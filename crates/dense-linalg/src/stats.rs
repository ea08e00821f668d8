use crate::arithmetic::{divide, dot, subtract, transpose};
use crate::error::{LinalgError, Result};
use crate::math::Matrix;
use crate::reduction::{mean, Axis};

/// Sample covariance matrix of `x`.
///
/// Rows of `x` are observations and columns are variables. The result is a
/// symmetric `k x k` matrix (k = number of columns) whose `(i, j)` entry is
/// the covariance of variables `i` and `j` with divisor `N - 1`.
///
/// # Arguments
///
/// * `x` - Observations x variables matrix with at least two rows.
///
/// # Returns
///
/// The covariance matrix, or a `Value` error when fewer than two observations
/// are given.
pub fn cov(x: &Matrix) -> Result<Matrix> {
    let n = x.nrows();
    if n < 2 {
        return Err(LinalgError::value(format!(
            "covariance needs at least 2 observations, got {}",
            n
        )));
    }

    let means = mean(x, Axis::PerColumn)?;
    let centered = subtract(x, &Matrix::from_rows(&vec![means.as_slice(); n])?)?;

    // c_ij and c_ji accumulate the same products in the same order, so the
    // result is exactly symmetric.
    let scatter = dot(&transpose(&centered), &centered)?;
    divide(&scatter, (n - 1) as f64)
}
