//! Shape compatibility checks run before any binary or scalar operation.
//!
//! Each check returns the narrowest error kind that describes the mismatch so
//! callers can tell a row problem from a column problem.
use crate::error::{LinalgError, Result};
use crate::math::Matrix;

/// Elementwise operations need identical shapes.
pub fn ensure_same_shape(a: &Matrix, b: &Matrix) -> Result<()> {
    let (ar, ac) = a.shape();
    let (br, bc) = b.shape();
    match (ar == br, ac == bc) {
        (true, true) => Ok(()),
        (false, true) => Err(LinalgError::RowMismatch { left: ar, right: br }),
        (true, false) => Err(LinalgError::ColumnMismatch { left: ac, right: bc }),
        (false, false) => Err(LinalgError::DimensionMismatch {
            left: a.shape(),
            right: b.shape(),
        }),
    }
}

/// How the right operand of a product is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductShape {
    /// `A.cols == B.rows`, plain matrix product.
    Matrix,
    /// `B` is a `1 x n` row vector read as an `n x 1` column.
    RowAsColumn,
}

/// Check `a . b` and report how `b` should be read.
///
/// A vector right operand of the wrong length is a `ColumnMismatch` against
/// `a`'s column count; a full matrix with the wrong row count is a
/// `DimensionMismatch`.
pub fn product_shape(a: &Matrix, b: &Matrix) -> Result<ProductShape> {
    if a.ncols() == b.nrows() {
        return Ok(ProductShape::Matrix);
    }
    if b.nrows() == 1 && b.ncols() == a.ncols() {
        return Ok(ProductShape::RowAsColumn);
    }
    if b.is_vector() {
        return Err(LinalgError::ColumnMismatch {
            left: a.ncols(),
            right: b.len(),
        });
    }
    Err(LinalgError::DimensionMismatch {
        left: a.shape(),
        right: b.shape(),
    })
}

pub fn ensure_nonzero(divisor: f64) -> Result<()> {
    if divisor == 0.0 {
        return Err(LinalgError::DivideByZero);
    }
    Ok(())
}

pub fn ensure_square(a: &Matrix) -> Result<()> {
    if !a.is_square() {
        let n = a.nrows().max(a.ncols());
        return Err(LinalgError::DimensionMismatch {
            left: a.shape(),
            right: (n, n),
        });
    }
    Ok(())
}
