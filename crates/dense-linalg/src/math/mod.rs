//! Dense storage, shape validation and slice kernels.
//!
//! `Matrix` owns a contiguous row-major buffer plus its shape. All higher
//! level modules take matrices by reference and hand back fresh ones.
pub mod matrix;
pub mod shape;
pub mod vector;

pub use matrix::Matrix;
