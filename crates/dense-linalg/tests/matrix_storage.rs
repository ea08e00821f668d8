//! Integration tests for the Matrix storage type.

use dense_linalg::math::Matrix;
use dense_linalg::{ErrorKind, LinalgError};

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn from_shape_vec_keeps_row_major_order() {
    let a = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(a.shape(), (2, 3));
    assert_eq!(a.len(), 6);
    assert_eq!(a[(1, 0)], 4.0);
    assert_eq!(a.row_slice(1).unwrap(), &[4.0, 5.0, 6.0]);
}

#[test]
fn shape_mismatch_errors() {
    let err = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn zero_sized_shapes_are_rejected() {
    assert!(Matrix::zeros(0, 3).is_err());
    assert!(Matrix::from_vec(vec![]).is_err());
    assert!(Matrix::from_rows::<Vec<f64>>(&[]).is_err());
}

#[test]
fn overflowing_shapes_are_shape_errors() {
    let err = Matrix::zeros(usize::MAX, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    // 2^63 x 2 wraps to zero elements in unchecked arithmetic.
    let err = Matrix::from_shape_vec((1 << 63, 2), vec![]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    // Fits in usize but not in an allocation.
    assert!(Matrix::zeros(1 << 62, 1).is_err());
}

#[test]
fn deserialize_rejects_overflowing_shape() {
    let json = r#"{"data":[],"rows":9223372036854775808,"cols":2}"#;
    assert!(serde_json::from_str::<Matrix>(json).is_err());
}

#[test]
fn flat_input_is_a_row_vector() {
    let v = Matrix::from_vec(vec![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(v.shape(), (1, 3));
    assert!(v.is_vector());
}

#[test]
fn identity_has_unit_diagonal() {
    let eye = Matrix::identity(3).unwrap();
    for r in 0..3 {
        for c in 0..3 {
            assert_eq!(eye[(r, c)], if r == c { 1.0 } else { 0.0 });
        }
    }
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

#[test]
fn row_access_is_bounds_checked() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    assert_eq!(a.get_row(0).unwrap(), vec![1.0, 2.0]);
    assert_eq!(
        a.get_row(2).unwrap_err(),
        LinalgError::Index { index: 2, bound: 2 }
    );
}

#[test]
fn element_access_is_linear_and_bounds_checked() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    assert_eq!(a.get_element(3).unwrap(), 4.0);
    assert_eq!(a.get_element(4).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(a.get(1, 0).unwrap(), 3.0);
    assert!(a.get(0, 2).is_err());
}

#[test]
fn column_extraction() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    assert_eq!(a.column(1).unwrap(), vec![2.0, 4.0, 6.0]);
    assert!(a.column(2).is_err());
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

#[test]
fn set_row_replaces_in_place() {
    let mut a = Matrix::zeros(2, 2).unwrap();
    a.set_row(&[7.0, 8.0], 1).unwrap();
    assert_eq!(a.to_rows(), vec![vec![0.0, 0.0], vec![7.0, 8.0]]);
}

#[test]
fn set_row_failure_leaves_matrix_untouched() {
    let mut a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    let before = a.clone();
    assert_eq!(a.set_row(&[9.0, 9.0], 5).unwrap_err().kind(), ErrorKind::Index);
    assert!(a.set_row(&[9.0], 0).is_err());
    assert_eq!(a, before);
}

#[test]
fn clones_do_not_share_buffers() {
    let a = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
    let mut b = a.clone();
    b.set_row(&[5.0, 6.0], 0).unwrap();
    assert_eq!(a.as_slice(), &[1.0, 2.0]);
}

#[test]
fn serializes_with_shape() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    let json = serde_json::to_string(&a).unwrap();
    assert!(json.contains("\"rows\":2"));
    let back: Matrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
}
