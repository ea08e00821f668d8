//! Ordinary least squares through the normal equations.
//!
//! `XᵗX θ = Xᵗy` is symmetric positive (semi-)definite, so it is factored with
//! Cholesky and solved by two triangular substitutions.
use crate::arithmetic::{dot, transpose};
use crate::error::{LinalgError, Result};
use crate::math::{shape, Matrix};

/// A Cholesky pivot not greater than `SINGULAR_TOLERANCE * max(diag(XᵗX))`
/// marks the system as singular.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Regression coefficients minimising `||Xθ - y||²`.
///
/// # Arguments
///
/// * `x` - Design matrix, `N` observations by `K` features.
/// * `y` - Target vector of length `N` (row or column vector).
///
/// # Returns
///
/// `θ` as a `1 x K` row vector. Fails with `Value` when `y` is not a vector of
/// length `N`, and with `SingularMatrix` when `XᵗX` cannot be factored.
pub fn least_squares(x: &Matrix, y: &Matrix) -> Result<Matrix> {
    if !y.is_vector() {
        return Err(LinalgError::value(format!(
            "target must be a vector, got shape {:?}",
            y.shape()
        )));
    }
    if x.nrows() != y.len() {
        return Err(LinalgError::value(format!(
            "number of rows of X ({}) must match the number of targets ({})",
            x.nrows(),
            y.len()
        )));
    }

    let xt = transpose(x);
    let xtx = dot(&xt, x)?;
    let y_col = Matrix::from_shape_vec((y.len(), 1), y.to_vec())?;
    let xty = dot(&xt, &y_col)?;

    let l = cholesky(&xtx)?;
    let theta = solve_factored(&l, xty.as_slice());
    log::debug!(
        "least squares: {} observations, {} features",
        x.nrows(),
        x.ncols()
    );
    Matrix::from_vec(theta)
}

/// Lower-triangular `L` with `a = L Lᵗ`.
fn cholesky(a: &Matrix) -> Result<Matrix> {
    shape::ensure_square(a)?;
    let n = a.nrows();
    let scale = (0..n).map(|i| a[(i, i)]).fold(0.0_f64, f64::max);
    let threshold = SINGULAR_TOLERANCE * scale;
    let mut l = Matrix::zeros(n, n)?;

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[(i, k)] * l[(j, k)];
            }
            if i == j {
                let diag = a[(j, j)] - sum;
                if diag.is_nan() || diag <= threshold {
                    return Err(LinalgError::SingularMatrix {
                        pivot: j,
                        value: diag,
                    });
                }
                l[(j, j)] = diag.sqrt();
            } else {
                l[(i, j)] = (a[(i, j)] - sum) / l[(j, j)];
            }
        }
    }

    Ok(l)
}

/// Solve `L Lᵗ x = b` by forward then back substitution.
fn solve_factored(l: &Matrix, b: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[(i, k)] * z[k];
        }
        z[i] = sum / l[(i, i)];
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= l[(k, i)] * x[k];
        }
        x[i] = sum / l[(i, i)];
    }
    x
}
