//! Integration tests for the host-facing conversion rules.

use dense_linalg::boundary::{self, HostArray, HostIndices, HostValue};
use dense_linalg::ErrorKind;

fn nested(rows: &[&[f64]]) -> HostArray {
    HostArray::Matrix(rows.iter().map(|r| r.to_vec()).collect())
}

#[test]
fn ragged_nested_input_is_shape_error() {
    let err = boundary::sum(nested(&[&[1.0, 2.0], &[3.0]])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn single_row_results_come_back_flat() {
    let out = boundary::power(vec![1.0, 2.0, 3.0].into(), 2).unwrap();
    assert_eq!(out, HostValue::Vector(vec![1.0, 4.0, 9.0]));

    let out = boundary::transpose(nested(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap();
    assert_eq!(out, HostValue::Matrix(vec![vec![1.0, 3.0], vec![2.0, 4.0]]));
}

#[test]
fn matrix_times_flat_vector_is_flat() {
    let out = boundary::dot_product(nested(&[&[1.0, 2.0], &[3.0, 4.0]]), vec![1.0, 1.0].into())
        .unwrap();
    assert_eq!(out, HostValue::Vector(vec![3.0, 7.0]));
}

#[test]
fn reductions_unwrap_single_values() {
    let out = boundary::variance(nested(&[&[1.0, 2.0, 3.0]]), 1, Some(1)).unwrap();
    assert_eq!(out, HostValue::Scalar(1.0));

    let out = boundary::mean(vec![-5.0, 3.0, 10.0, 2.0, 5.0, 0.0].into(), None).unwrap();
    assert_eq!(out.as_scalar(), Some(2.5));
}

#[test]
fn single_column_reduction_is_also_unwrapped() {
    // A 3x1 matrix reduced per column yields one value even though the input
    // has more than one row.
    let out = boundary::mean(nested(&[&[1.0], &[2.0], &[6.0]]), Some(0)).unwrap();
    assert_eq!(out, HostValue::Scalar(3.0));
}

#[test]
fn multi_value_reductions_stay_vectors() {
    let out = boundary::mean(nested(&[&[1.0, 2.0], &[3.0, 4.0]]), Some(0)).unwrap();
    assert_eq!(out, HostValue::Vector(vec![2.0, 3.0]));
}

#[test]
fn flat_input_reduces_whole_vector() {
    let out = boundary::std(vec![-5.0, 3.0, 8.0, 2.0, 0.0, -1.0].into(), 0, Some(0)).unwrap();
    let s = out.as_scalar().unwrap();
    assert!((s - 3.9756201472921875).abs() < 1e-12);
}

#[test]
fn invalid_axis_is_value_error() {
    let err = boundary::mean(nested(&[&[1.0, 2.0]]), Some(3)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn least_squares_returns_flat_coefficients() {
    let x = nested(&[&[1.0, 0.0], &[1.0, 1.0], &[1.0, 2.0]]);
    let theta = boundary::least_squares(x, vec![1.0, 3.0, 5.0].into()).unwrap();
    assert_eq!(theta.len(), 2);
    assert!((theta[0] - 1.0).abs() < 1e-9 && (theta[1] - 2.0).abs() < 1e-9);
}

#[test]
fn covariance_is_nested() {
    let out = boundary::covariance(nested(&[&[1.0, 2.0], &[3.0, 6.0]])).unwrap();
    assert_eq!(out, HostValue::Matrix(vec![vec![2.0, 4.0], vec![4.0, 8.0]]));
}

#[test]
fn eigen_pair_has_one_vector_per_row() {
    let pair = boundary::eigen_solve(nested(&[&[2.0, 1.0], &[1.0, 2.0]]), 1e-9, 100).unwrap();
    assert_eq!(pair.values.len(), 2);
    assert_eq!(pair.vectors.len(), 2);
    for (lambda, v) in pair.values.iter().zip(&pair.vectors) {
        // A v = lambda v for A = [[2, 1], [1, 2]]
        assert!((2.0 * v[0] + v[1] - lambda * v[0]).abs() < 1e-9);
        assert!((v[0] + 2.0 * v[1] - lambda * v[1]).abs() < 1e-9);
    }
}

#[test]
fn errors_keep_their_kind() {
    let err = boundary::divide(vec![1.0].into(), 0.0).unwrap_err();
    assert_eq!(err.kind().name(), "DivideByZeroError");
    let err = boundary::subtract(nested(&[&[1.0, 2.0]]), nested(&[&[1.0, 2.0], &[3.0, 4.0]]))
        .unwrap_err();
    assert_eq!(err.kind().name(), "RowMismatchError");
}

#[test]
fn host_values_serialize_untagged() {
    assert_eq!(serde_json::to_string(&HostValue::Scalar(1.5)).unwrap(), "1.5");
    assert_eq!(
        serde_json::to_string(&HostValue::Vector(vec![1.0, 2.0])).unwrap(),
        "[1.0,2.0]"
    );
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

fn sample() -> HostArray {
    vec![-5.0, 3.0, 10.0, 2.0, 1.0, -1.0].into()
}

#[test]
fn flat_argsort_is_flat_like_sort() {
    let order = boundary::argsort(sample(), None).unwrap();
    assert_eq!(order, HostIndices::Flat(vec![0, 5, 4, 3, 1, 2]));
    assert_eq!(serde_json::to_string(&order).unwrap(), "[0,5,4,3,1,2]");

    let sorted = boundary::sort(sample(), None).unwrap();
    assert_eq!(
        sorted,
        HostValue::Vector(vec![-5.0, -1.0, 1.0, 2.0, 3.0, 10.0])
    );
}

#[test]
fn argsort_per_row_is_nested() {
    let order = boundary::argsort(nested(&[&[3.0, 1.0, 2.0], &[0.0, 5.0, 4.0]]), Some(1)).unwrap();
    assert_eq!(order, HostIndices::Nested(vec![vec![1, 2, 0], vec![0, 2, 1]]));
}

#[test]
fn flat_arg_extrema_are_one_element_lists() {
    assert_eq!(boundary::argmin(sample(), None).unwrap(), vec![0]);
    assert_eq!(boundary::argmax(sample(), Some(0)).unwrap(), vec![2]);
}

#[test]
fn version_reports_major_and_minor() {
    assert_eq!(boundary::version(), "Version 0.2");
}
