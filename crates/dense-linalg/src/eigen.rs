//! Eigen-decomposition of symmetric matrices with the cyclic Jacobi method.
//!
//! Each sweep visits every off-diagonal pair `(p, q)`, `p < q`, in row order
//! and applies the plane rotation that zeroes `D[p][q]` whenever its
//! magnitude exceeds the tolerance. Rotations are accumulated into `V`, whose
//! columns converge to the eigenvectors while the diagonal of `D` converges to
//! the eigenvalues.
//!
//! The solver stops once no off-diagonal entry exceeds the tolerance, or after
//! `max_sweeps` sweeps. What happens in the second case is set by
//! [`ConvergencePolicy`].
//!
//! # Example
//!
//! ```
//! use dense_linalg::eigen::eigen_solve;
//! use dense_linalg::math::Matrix;
//!
//! let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
//! let eig = eigen_solve(&a, 1e-9, 100).unwrap();
//! assert!(eig.converged);
//! let mut values = eig.values.clone();
//! values.sort_by(f64::total_cmp);
//! assert!((values[0] - 1.0).abs() < 1e-9 && (values[1] - 3.0).abs() < 1e-9);
//! ```
use serde::Serialize;

use crate::config::{ConvergencePolicy, EigenConfig};
use crate::error::{LinalgError, Result};
use crate::math::{shape, Matrix};

/// Asymmetry allowed relative to the largest entry magnitude.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EigenResult {
    /// Diagonal of the final iterate, in no particular order.
    pub values: Vec<f64>,
    /// `n x n`; row `i` is the unit eigenvector for `values[i]`.
    pub vectors: Matrix,
    pub converged: bool,
    /// Sweeps actually performed.
    pub sweeps: usize,
    /// Largest remaining `|D[p][q]|`, `p != q`.
    pub off_diagonal: f64,
}

impl EigenResult {
    pub fn vector(&self, i: usize) -> Result<&[f64]> {
        self.vectors.row_slice(i)
    }

    /// Eigenpairs reordered by ascending eigenvalue.
    pub fn sorted(&self) -> Result<EigenResult> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&i, &j| self.values[i].total_cmp(&self.values[j]));

        let rows = order
            .iter()
            .map(|&i| self.vectors.row_slice(i))
            .collect::<Result<Vec<_>>>()?;
        Ok(EigenResult {
            values: order.iter().map(|&i| self.values[i]).collect(),
            vectors: Matrix::from_rows(&rows)?,
            converged: self.converged,
            sweeps: self.sweeps,
            off_diagonal: self.off_diagonal,
        })
    }
}

/// Decompose the symmetric matrix `a` with best-effort convergence.
///
/// # Arguments
///
/// * `a` - Square symmetric matrix.
/// * `tolerance` - Off-diagonal magnitude treated as zero.
/// * `max_sweeps` - Cap on the number of full sweeps.
pub fn eigen_solve(a: &Matrix, tolerance: f64, max_sweeps: usize) -> Result<EigenResult> {
    jacobi(a, &EigenConfig::new(tolerance, max_sweeps))
}

pub fn jacobi(a: &Matrix, config: &EigenConfig) -> Result<EigenResult> {
    validate(a, config)?;

    let n = a.nrows();
    let tol = config.tolerance;
    let mut d = a.clone();
    let mut v = Matrix::identity(n)?;
    let mut sweeps = 0;
    let mut off = max_off_diagonal(&d);

    while off > tol && sweeps < config.max_sweeps {
        for p in 0..n {
            for q in (p + 1)..n {
                if d[(p, q)].abs() > tol {
                    rotate(&mut d, &mut v, p, q);
                }
            }
        }
        sweeps += 1;
        off = max_off_diagonal(&d);
        log::trace!("jacobi sweep {}: off-diagonal {:e}", sweeps, off);
    }

    let converged = off <= tol;
    if !converged {
        match config.policy {
            ConvergencePolicy::Strict => {
                return Err(LinalgError::NoConvergence {
                    sweeps,
                    off_diagonal: off,
                })
            }
            ConvergencePolicy::BestEffort => log::warn!(
                "jacobi: no convergence after {} sweeps (off-diagonal {:e} > {:e}), returning last iterate",
                sweeps,
                off,
                tol
            ),
        }
    } else {
        log::debug!("jacobi: {}x{} converged in {} sweeps", n, n, sweeps);
    }

    Ok(EigenResult {
        values: (0..n).map(|i| d[(i, i)]).collect(),
        vectors: v.transpose(),
        converged,
        sweeps,
        off_diagonal: off,
    })
}

fn validate(a: &Matrix, config: &EigenConfig) -> Result<()> {
    shape::ensure_square(a)?;
    if !(config.tolerance >= 0.0 && config.tolerance.is_finite()) {
        return Err(LinalgError::value(format!(
            "tolerance must be finite and non-negative, got {}",
            config.tolerance
        )));
    }
    if a.as_slice().iter().any(|x| !x.is_finite()) {
        return Err(LinalgError::value("matrix contains non-finite values"));
    }

    let n = a.nrows();
    let scale = a.as_slice().iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    for i in 0..n {
        for j in (i + 1)..n {
            if (a[(i, j)] - a[(j, i)]).abs() > SYMMETRY_TOLERANCE * scale {
                return Err(LinalgError::value(format!(
                    "matrix is not symmetric at ({}, {})",
                    i, j
                )));
            }
        }
    }
    Ok(())
}

fn max_off_diagonal(d: &Matrix) -> f64 {
    let n = d.nrows();
    let mut max = 0.0_f64;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                max = max.max(d[(i, j)].abs());
            }
        }
    }
    max
}

/// Apply the rotation annihilating `d[(p, q)]` and fold it into `v`.
fn rotate(d: &mut Matrix, v: &mut Matrix, p: usize, q: usize) {
    let n = d.nrows();
    let apq = d[(p, q)];
    let theta = (d[(q, q)] - d[(p, p)]) / (2.0 * apq);
    // Smaller root of t^2 + 2 t theta - 1 = 0; hypot keeps large theta finite.
    let t = theta.signum() / (theta.abs() + theta.hypot(1.0));
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    for r in 0..n {
        if r == p || r == q {
            continue;
        }
        let drp = d[(r, p)];
        let drq = d[(r, q)];
        let rp = c * drp - s * drq;
        let rq = s * drp + c * drq;
        d[(r, p)] = rp;
        d[(p, r)] = rp;
        d[(r, q)] = rq;
        d[(q, r)] = rq;
    }
    d[(p, p)] -= t * apq;
    d[(q, q)] += t * apq;
    d[(p, q)] = 0.0;
    d[(q, p)] = 0.0;

    for r in 0..n {
        let vrp = v[(r, p)];
        let vrq = v[(r, q)];
        v[(r, p)] = c * vrp - s * vrq;
        v[(r, q)] = s * vrp + c * vrq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rotation_diagonalises_2x2() {
        let mut d = Matrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
        let mut v = Matrix::identity(2).unwrap();
        rotate(&mut d, &mut v, 0, 1);
        assert!((d[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((d[(1, 1)] - 3.0).abs() < 1e-12);
        assert_eq!(max_off_diagonal(&d), 0.0);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((v[(0, 0)] - h).abs() < 1e-12 && (v[(1, 0)] + h).abs() < 1e-12);
    }

    #[test]
    fn one_by_one_needs_no_sweeps() {
        let a = Matrix::from_vec(vec![5.0]).unwrap();
        let eig = eigen_solve(&a, 1e-12, 10).unwrap();
        assert!(eig.converged);
        assert_eq!(eig.sweeps, 0);
        assert_eq!(eig.values, vec![5.0]);
    }
}
