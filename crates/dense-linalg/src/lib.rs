//! dense-linalg: a small dense matrix kernel for interpreter bindings.
//!
//! This crate provides a row-major `f64` matrix with shape validation,
//! elementwise arithmetic, axis reductions (mean, variance, standard
//! deviation), a covariance matrix, least-squares regression through the
//! normal equations and a cyclic Jacobi eigensolver for symmetric matrices.
//!
//! Every operation is a free function over borrowed matrices that returns a
//! newly owned result. There is no shared or global state, so independent
//! calls can run from any thread. The `boundary` module holds the conversion
//! rules an interpreter binding (see the `dense-linalg-py` crate) needs.
pub mod arithmetic;
pub mod boundary;
pub mod config;
pub mod eigen;
pub mod error;
pub mod math;
pub mod ordering;
pub mod reduction;
pub mod regression;
pub mod stats;

pub use error::{ErrorKind, LinalgError, Result};
pub use math::Matrix;
