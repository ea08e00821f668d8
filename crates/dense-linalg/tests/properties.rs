//! Algebraic properties checked over seeded random matrices.

use dense_linalg::arithmetic::{divide, dot, subtract, sum, transpose};
use dense_linalg::eigen::eigen_solve;
use dense_linalg::math::Matrix;
use dense_linalg::stats::cov;
use dense_linalg::LinalgError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng) -> Matrix {
    let rows = rng.gen_range(1..8);
    let cols = rng.gen_range(1..8);
    let data = (0..rows * cols).map(|_| rng.gen_range(-100.0..100.0)).collect();
    Matrix::from_shape_vec((rows, cols), data).unwrap()
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        let a = random_matrix(&mut rng);
        assert_eq!(transpose(&transpose(&a)), a);
    }
}

#[test]
fn identity_is_right_neutral() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let a = random_matrix(&mut rng);
        let eye = Matrix::identity(a.ncols()).unwrap();
        assert_eq!(dot(&a, &eye).unwrap(), a);
    }
}

#[test]
fn sum_matches_independent_fold() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let a = random_matrix(&mut rng);
        let mut expected = 0.0;
        for r in 0..a.nrows() {
            for c in 0..a.ncols() {
                expected += a.get(r, c).unwrap();
            }
        }
        let scale = a.as_slice().iter().map(|v| v.abs()).sum::<f64>().max(1.0);
        assert!((sum(&a) - expected).abs() <= 1e-12 * scale);
    }
}

#[test]
fn divide_by_zero_always_fails() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..50 {
        let a = random_matrix(&mut rng);
        assert_eq!(divide(&a, 0.0).unwrap_err(), LinalgError::DivideByZero);
    }
}

#[test]
fn subtract_self_is_zero() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let a = random_matrix(&mut rng);
        assert!(subtract(&a, &a).unwrap().as_slice().iter().all(|&v| v == 0.0));
    }
}

#[test]
fn covariance_is_symmetric_positive_semidefinite() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..50 {
        let n = rng.gen_range(2..10);
        let k = rng.gen_range(1..6);
        let data = (0..n * k).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let x = Matrix::from_shape_vec((n, k), data).unwrap();
        let c = cov(&x).unwrap();

        for i in 0..k {
            for j in 0..k {
                assert_eq!(c[(i, j)], c[(j, i)]);
            }
        }

        // PSD: every eigenvalue is non-negative up to rounding, and
        // z^T C z >= 0 for random z.
        let scale = (0..k).map(|i| c[(i, i)]).fold(1.0_f64, f64::max);
        let eig = eigen_solve(&c, 1e-12 * scale, 200).unwrap();
        for &lambda in &eig.values {
            assert!(lambda >= -1e-9 * scale, "negative eigenvalue {}", lambda);
        }
        let z = Matrix::from_vec((0..k).map(|_| rng.gen_range(-1.0..1.0)).collect()).unwrap();
        let cz = dot(&c, &z).unwrap();
        let quad: f64 = cz.as_slice().iter().zip(z.as_slice()).map(|(a, b)| a * b).sum();
        assert!(quad >= -1e-9 * scale);
    }
}
