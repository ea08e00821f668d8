use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;

use dense_linalg::boundary::{self, HostArray, HostIndices, HostValue};
use dense_linalg::config::{ConvergencePolicy, EigenConfig};
use dense_linalg::{ErrorKind, LinalgError as KernelError};

create_exception!(dense_linalg_py, LinalgError, PyException);
create_exception!(dense_linalg_py, ShapeError, LinalgError);
create_exception!(dense_linalg_py, IndexError, LinalgError);
create_exception!(dense_linalg_py, DimensionMismatchError, LinalgError);
create_exception!(dense_linalg_py, ColumnMismatchError, LinalgError);
create_exception!(dense_linalg_py, RowMismatchError, LinalgError);
create_exception!(dense_linalg_py, DivideByZeroError, LinalgError);
create_exception!(dense_linalg_py, ValueError, LinalgError);
create_exception!(dense_linalg_py, SingularMatrixError, LinalgError);
create_exception!(dense_linalg_py, NoConvergenceError, LinalgError);

fn to_py_err(err: KernelError) -> PyErr {
    let msg = err.to_string();
    match err.kind() {
        ErrorKind::Shape => ShapeError::new_err(msg),
        ErrorKind::Index => IndexError::new_err(msg),
        ErrorKind::DimensionMismatch => DimensionMismatchError::new_err(msg),
        ErrorKind::ColumnMismatch => ColumnMismatchError::new_err(msg),
        ErrorKind::RowMismatch => RowMismatchError::new_err(msg),
        ErrorKind::DivideByZero => DivideByZeroError::new_err(msg),
        ErrorKind::Value => ValueError::new_err(msg),
        ErrorKind::SingularMatrix => SingularMatrixError::new_err(msg),
        ErrorKind::NoConvergence => NoConvergenceError::new_err(msg),
    }
}

/// Nested list of rows, or a flat list read as a single row.
#[derive(FromPyObject)]
enum ArrayArg {
    Nested(Vec<Vec<f64>>),
    Flat(Vec<f64>),
}

impl From<ArrayArg> for HostArray {
    fn from(arg: ArrayArg) -> Self {
        match arg {
            ArrayArg::Nested(rows) => HostArray::Matrix(rows),
            ArrayArg::Flat(values) => HostArray::Vector(values),
        }
    }
}

fn value_to_py(py: Python<'_>, value: HostValue) -> PyObject {
    match value {
        HostValue::Scalar(v) => v.into_py(py),
        HostValue::Vector(v) => v.into_py(py),
        HostValue::Matrix(rows) => rows.into_py(py),
    }
}

fn indices_to_py(py: Python<'_>, indices: HostIndices) -> PyObject {
    match indices {
        HostIndices::Flat(order) => order.into_py(py),
        HostIndices::Nested(lanes) => lanes.into_py(py),
    }
}

fn check_dof(dof: i64) -> PyResult<i64> {
    if dof < 0 {
        return Err(ValueError::new_err(format!(
            "degrees of freedom must be non-negative, got {}",
            dof
        )));
    }
    Ok(dof)
}

/// Matrix product of `a` and `v`.
///
/// A flat `v` is treated as a column vector and the result comes back flat.
#[pyfunction]
fn dot_product(py: Python<'_>, a: ArrayArg, v: ArrayArg) -> PyResult<PyObject> {
    let out = boundary::dot_product(a.into(), v.into()).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

/// Raise every element to the integer power `p`.
#[pyfunction]
fn power(py: Python<'_>, a: ArrayArg, p: i32) -> PyResult<PyObject> {
    let out = boundary::power(a.into(), p).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

#[pyfunction]
fn subtract(py: Python<'_>, a: ArrayArg, b: ArrayArg) -> PyResult<PyObject> {
    let out = boundary::subtract(a.into(), b.into()).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

/// Divide every element by the scalar `n`. Raises `DivideByZeroError` for `n == 0`.
#[pyfunction]
fn divide(py: Python<'_>, a: ArrayArg, n: f64) -> PyResult<PyObject> {
    let out = boundary::divide(a.into(), n).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

#[pyfunction]
fn sum(a: ArrayArg) -> PyResult<f64> {
    boundary::sum(a.into()).map_err(to_py_err)
}

#[pyfunction]
fn transpose(py: Python<'_>, a: ArrayArg) -> PyResult<PyObject> {
    let out = boundary::transpose(a.into()).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

#[pyfunction]
fn sigmoid(py: Python<'_>, a: ArrayArg) -> PyResult<PyObject> {
    let out = boundary::sigmoid(a.into()).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

/// Ordinary least squares through the normal equations.
///
/// Args:
///     x (list[list[float]]): Design matrix, one sample per row.
///     y (list[float]): Targets, one per sample.
///
/// Returns:
///     list[float]: One coefficient per column of `x`.
#[pyfunction]
fn least_squares(x: ArrayArg, y: ArrayArg) -> PyResult<Vec<f64>> {
    boundary::least_squares(x.into(), y.into()).map_err(to_py_err)
}

/// Arithmetic mean.
///
/// Args:
///     a: Nested or flat list.
///     axis (int, optional): 0 per column, 1 per row, None for the whole matrix.
///         Ignored for flat input.
#[pyfunction]
#[pyo3(signature = (a, axis=None))]
fn mean(py: Python<'_>, a: ArrayArg, axis: Option<i64>) -> PyResult<PyObject> {
    let out = boundary::mean(a.into(), axis).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

/// Standard deviation with `dof` degrees of freedom removed from the count.
#[pyfunction]
#[pyo3(name = "std", signature = (a, dof=0, axis=None))]
fn std_dev(py: Python<'_>, a: ArrayArg, dof: i64, axis: Option<i64>) -> PyResult<PyObject> {
    let out = boundary::std(a.into(), check_dof(dof)?, axis).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

/// Variance with `dof` degrees of freedom removed from the count.
#[pyfunction]
#[pyo3(signature = (a, dof=0, axis=None))]
fn variance(py: Python<'_>, a: ArrayArg, dof: i64, axis: Option<i64>) -> PyResult<PyObject> {
    let out = boundary::variance(a.into(), check_dof(dof)?, axis).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

/// Sample covariance of the columns of `a`.
#[pyfunction]
fn covariance(py: Python<'_>, a: ArrayArg) -> PyResult<PyObject> {
    let out = boundary::covariance(a.into()).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

/// Jacobi eigen-decomposition of a symmetric matrix.
///
/// Args:
///     a (list[list[float]]): Square symmetric matrix.
///     tolerance (float): Off-diagonal magnitude treated as zero.
///     max_iterations (int): Cap on the number of sweeps.
///     strict (bool): Raise `NoConvergenceError` instead of returning the
///         last iterate when the cap is reached. Defaults to False.
///
/// Returns:
///     tuple[list[float], list[list[float]]]: Eigenvalues (unsorted) and one
///     eigenvector per row.
#[pyfunction]
#[pyo3(signature = (a, tolerance=1e-9, max_iterations=100, strict=false))]
fn eigen_solve(
    a: ArrayArg,
    tolerance: f64,
    max_iterations: usize,
    strict: bool,
) -> PyResult<(Vec<f64>, Vec<Vec<f64>>)> {
    let policy = if strict {
        ConvergencePolicy::Strict
    } else {
        ConvergencePolicy::BestEffort
    };
    let config = EigenConfig::new(tolerance, max_iterations).with_policy(policy);
    let pair = boundary::eigen_solve_with(a.into(), &config).map_err(to_py_err)?;
    Ok((pair.values, pair.vectors))
}

#[pyfunction]
#[pyo3(signature = (a, axis=None))]
fn argmax(a: ArrayArg, axis: Option<i64>) -> PyResult<Vec<usize>> {
    boundary::argmax(a.into(), axis).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (a, axis=None))]
fn argmin(a: ArrayArg, axis: Option<i64>) -> PyResult<Vec<usize>> {
    boundary::argmin(a.into(), axis).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (a, axis=None))]
fn sort(py: Python<'_>, a: ArrayArg, axis: Option<i64>) -> PyResult<PyObject> {
    let out = boundary::sort(a.into(), axis).map_err(to_py_err)?;
    Ok(value_to_py(py, out))
}

#[pyfunction]
#[pyo3(signature = (a, axis=None))]
fn argsort(py: Python<'_>, a: ArrayArg, axis: Option<i64>) -> PyResult<PyObject> {
    let out = boundary::argsort(a.into(), axis).map_err(to_py_err)?;
    Ok(indices_to_py(py, out))
}

/// Most frequent value; ties go to the value seen first.
#[pyfunction]
fn max_occurrence(a: ArrayArg) -> PyResult<f64> {
    boundary::max_occurrence(a.into()).map_err(to_py_err)
}

#[pyfunction]
fn version() -> &'static str {
    boundary::version()
}

#[pymodule]
fn dense_linalg_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // A host process may already own the logger.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("DENSE_LINALG_LOG", "warn"),
    )
    .try_init();

    let py = m.py();
    m.add("LinalgError", py.get_type_bound::<LinalgError>())?;
    m.add("ShapeError", py.get_type_bound::<ShapeError>())?;
    m.add("IndexError", py.get_type_bound::<IndexError>())?;
    m.add("DimensionMismatchError", py.get_type_bound::<DimensionMismatchError>())?;
    m.add("ColumnMismatchError", py.get_type_bound::<ColumnMismatchError>())?;
    m.add("RowMismatchError", py.get_type_bound::<RowMismatchError>())?;
    m.add("DivideByZeroError", py.get_type_bound::<DivideByZeroError>())?;
    m.add("ValueError", py.get_type_bound::<ValueError>())?;
    m.add("SingularMatrixError", py.get_type_bound::<SingularMatrixError>())?;
    m.add("NoConvergenceError", py.get_type_bound::<NoConvergenceError>())?;

    m.add("__version__", boundary::VERSION)?;
    m.add_function(wrap_pyfunction!(dot_product, m)?)?;
    m.add_function(wrap_pyfunction!(power, m)?)?;
    m.add_function(wrap_pyfunction!(subtract, m)?)?;
    m.add_function(wrap_pyfunction!(divide, m)?)?;
    m.add_function(wrap_pyfunction!(sum, m)?)?;
    m.add_function(wrap_pyfunction!(transpose, m)?)?;
    m.add_function(wrap_pyfunction!(sigmoid, m)?)?;
    m.add_function(wrap_pyfunction!(least_squares, m)?)?;
    m.add_function(wrap_pyfunction!(mean, m)?)?;
    m.add_function(wrap_pyfunction!(std_dev, m)?)?;
    m.add_function(wrap_pyfunction!(variance, m)?)?;
    m.add_function(wrap_pyfunction!(covariance, m)?)?;
    m.add_function(wrap_pyfunction!(eigen_solve, m)?)?;
    m.add_function(wrap_pyfunction!(argmax, m)?)?;
    m.add_function(wrap_pyfunction!(argmin, m)?)?;
    m.add_function(wrap_pyfunction!(sort, m)?)?;
    m.add_function(wrap_pyfunction!(argsort, m)?)?;
    m.add_function(wrap_pyfunction!(max_occurrence, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    Ok(())
}
