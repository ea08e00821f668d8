//! Error taxonomy shared by every kernel operation.
//!
//! Each operation checks its own preconditions and returns the most specific
//! `LinalgError` variant. Nothing is mutated before a check fails.
use std::error::Error;
use std::fmt;

pub type Result<T> = std::result::Result<T, LinalgError>;

#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Buffer length does not match `rows * cols`, or a dimension is zero.
    Shape { rows: usize, cols: usize, len: usize },
    /// Row or linear index outside `[0, bound)`.
    Index { index: usize, bound: usize },
    /// Both dimensions of a binary operation are incompatible.
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    ColumnMismatch { left: usize, right: usize },
    RowMismatch { left: usize, right: usize },
    DivideByZero,
    /// Degenerate reduction or invalid solver input.
    Value(String),
    /// Normal equations have no stable solution; `pivot` is the failing column.
    SingularMatrix { pivot: usize, value: f64 },
    /// Strict eigensolver ran out of sweeps.
    NoConvergence { sweeps: usize, off_diagonal: f64 },
}

/// Fieldless tag of a `LinalgError`, used by host bindings to pick an exception type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Shape,
    Index,
    DimensionMismatch,
    ColumnMismatch,
    RowMismatch,
    DivideByZero,
    Value,
    SingularMatrix,
    NoConvergence,
}

impl ErrorKind {
    /// Host-facing exception name.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Shape => "ShapeError",
            ErrorKind::Index => "IndexError",
            ErrorKind::DimensionMismatch => "DimensionMismatchError",
            ErrorKind::ColumnMismatch => "ColumnMismatchError",
            ErrorKind::RowMismatch => "RowMismatchError",
            ErrorKind::DivideByZero => "DivideByZeroError",
            ErrorKind::Value => "ValueError",
            ErrorKind::SingularMatrix => "SingularMatrixError",
            ErrorKind::NoConvergence => "NoConvergenceError",
        }
    }
}

impl LinalgError {
    pub fn value(msg: impl Into<String>) -> Self {
        LinalgError::Value(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LinalgError::Shape { .. } => ErrorKind::Shape,
            LinalgError::Index { .. } => ErrorKind::Index,
            LinalgError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            LinalgError::ColumnMismatch { .. } => ErrorKind::ColumnMismatch,
            LinalgError::RowMismatch { .. } => ErrorKind::RowMismatch,
            LinalgError::DivideByZero => ErrorKind::DivideByZero,
            LinalgError::Value(_) => ErrorKind::Value,
            LinalgError::SingularMatrix { .. } => ErrorKind::SingularMatrix,
            LinalgError::NoConvergence { .. } => ErrorKind::NoConvergence,
        }
    }
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgError::Shape { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            LinalgError::Index { index, bound } => {
                write!(f, "index {} out of range for length {}", index, bound)
            }
            LinalgError::DimensionMismatch { left, right } => write!(
                f,
                "dimension mismatch: ({}, {}) and ({}, {})",
                left.0, left.1, right.0, right.1
            ),
            LinalgError::ColumnMismatch { left, right } => {
                write!(f, "column mismatch: {} columns vs {}", left, right)
            }
            LinalgError::RowMismatch { left, right } => {
                write!(f, "row mismatch: {} rows vs {}", left, right)
            }
            LinalgError::DivideByZero => write!(f, "division by zero"),
            LinalgError::Value(msg) => write!(f, "{}", msg),
            LinalgError::SingularMatrix { pivot, value } => write!(
                f,
                "matrix is singular or ill-conditioned (pivot {} = {:e})",
                pivot, value
            ),
            LinalgError::NoConvergence {
                sweeps,
                off_diagonal,
            } => write!(
                f,
                "eigensolver did not converge after {} sweeps (off-diagonal {:e})",
                sweeps, off_diagonal
            ),
        }
    }
}

impl Error for LinalgError {}
