use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{LinalgError, Result};

/// Dense row-major matrix of `f64`.
///
/// A vector is a matrix with one row or one column. Every derived matrix owns
/// its own buffer; nothing hands out views into another matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Buffer length for a `rows x cols` shape, or `None` when a dimension is
/// zero or the buffer could not be allocated.
fn checked_len(rows: usize, cols: usize) -> Option<usize> {
    if rows == 0 || cols == 0 {
        return None;
    }
    let len = rows.checked_mul(cols)?;
    // Allocations are capped at isize::MAX bytes.
    len.checked_mul(std::mem::size_of::<f64>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .map(|_| len)
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = LinalgError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::from_shape_vec((raw.rows, raw.cols), raw.data)
    }
}

impl Matrix {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if checked_len(rows, cols) != Some(data.len()) {
            return Err(LinalgError::Shape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        Self::from_shape_vec((rows, cols), data)
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = checked_len(rows, cols).ok_or(LinalgError::Shape { rows, cols, len: 0 })?;
        Self::from_shape_vec((rows, cols), vec![0.0; len])
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut eye = Self::zeros(n, n)?;
        for i in 0..n {
            eye[(i, i)] = 1.0;
        }
        Ok(eye)
    }

    /// Flat input becomes a `1 x n` row vector.
    pub fn from_vec(data: Vec<f64>) -> Result<Self> {
        Self::from_shape_vec((1, data.len()), data)
    }

    /// Build from nested rows. Ragged input is a `Shape` error.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            data.extend_from_slice(row.as_ref());
        }
        if rows.iter().any(|r| r.as_ref().len() != cols) {
            return Err(LinalgError::Shape {
                rows: rows.len(),
                cols,
                len: data.len(),
            });
        }
        Self::from_shape_vec((rows.len(), cols), data)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true for a constructed matrix.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(LinalgError::Index {
                index: row,
                bound: self.rows,
            });
        }
        Ok(())
    }

    pub fn row_slice(&self, row: usize) -> Result<&[f64]> {
        self.check_row(row)?;
        let start = self.offset(row, 0);
        Ok(&self.data[start..start + self.cols])
    }

    pub fn get_row(&self, row: usize) -> Result<Vec<f64>> {
        self.row_slice(row).map(<[f64]>::to_vec)
    }

    /// Replace row `row` in place. The only mutation the matrix supports.
    pub fn set_row(&mut self, values: &[f64], row: usize) -> Result<()> {
        self.check_row(row)?;
        if values.len() != self.cols {
            return Err(LinalgError::ColumnMismatch {
                left: self.cols,
                right: values.len(),
            });
        }
        let start = self.offset(row, 0);
        self.data[start..start + self.cols].copy_from_slice(values);
        Ok(())
    }

    /// Linear access into the row-major buffer.
    pub fn get_element(&self, index: usize) -> Result<f64> {
        self.data
            .get(index)
            .copied()
            .ok_or(LinalgError::Index {
                index,
                bound: self.data.len(),
            })
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_row(row)?;
        if col >= self.cols {
            return Err(LinalgError::Index {
                index: col,
                bound: self.cols,
            });
        }
        Ok(self.data[self.offset(row, col)])
    }

    pub fn column(&self, col: usize) -> Result<Vec<f64>> {
        if col >= self.cols {
            return Err(LinalgError::Index {
                index: col,
                bound: self.cols,
            });
        }
        Ok((0..self.rows).map(|row| self[(row, col)]).collect())
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.cols)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// New `cols x rows` matrix; the input is left untouched.
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self[(r, c)]);
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    pub fn mapv<F>(&self, f: F) -> Matrix
    where
        F: FnMut(&f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(feature = "ndarray")]
impl From<&Matrix> for ndarray::Array2<f64> {
    fn from(m: &Matrix) -> Self {
        ndarray::Array2::from_shape_fn(m.shape(), |(r, c)| m[(r, c)])
    }
}

#[cfg(feature = "ndarray")]
impl TryFrom<ndarray::Array2<f64>> for Matrix {
    type Error = LinalgError;

    fn try_from(a: ndarray::Array2<f64>) -> Result<Self> {
        let shape = a.dim();
        // `iter` walks logical row-major order regardless of memory layout.
        Matrix::from_shape_vec(shape, a.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            LinalgError::Shape {
                rows: 2,
                cols: 2,
                len: 3
            }
        );
    }

    #[test]
    fn display_is_nested() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "[[1, 2], [3, 4]]");
    }

    #[test]
    fn deserialize_checks_shape() {
        let ok: Matrix = serde_json::from_str(r#"{"data":[1,2,3,4],"rows":2,"cols":2}"#).unwrap();
        assert_eq!(ok.shape(), (2, 2));
        let bad = serde_json::from_str::<Matrix>(r#"{"data":[1,2,3],"rows":2,"cols":2}"#);
        assert!(bad.is_err());
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn ndarray_round_trip_keeps_row_major_order() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let a: ndarray::Array2<f64> = (&m).into();
        assert_eq!(a[(1, 0)], 4.0);
        let back = Matrix::try_from(a.reversed_axes()).unwrap();
        assert_eq!(back.shape(), (3, 2));
        assert_eq!(back.row_slice(0).unwrap(), &[1.0, 4.0]);
    }
}
