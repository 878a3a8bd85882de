//! # 만화경 접기를 위한 Python 바인딩
//!
//! MATLAB/JS 쪽 호출 규약과 같이, 새 맵을 돌려주는 함수형 호출과
//! 입력 맵을 직접 고치는 프로시저형 호출을 모두 제공합니다.

use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3, PyReadwriteArray3};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::KaleidoscopeError;
use crate::layers::{FoldSummary, Kaleidoscope};
use crate::ops::{Frame, IterationLimits};

impl From<KaleidoscopeError> for PyErr {
    fn from(err: KaleidoscopeError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn summary_tuple(summary: FoldSummary) -> (usize, usize, usize) {
    (summary.reduced, summary.invalidated, summary.skipped)
}

#[pyclass(name = "Kaleidoscope", module = "kaleidoscope_fold")]
pub struct PyKaleidoscope {
    inner: Kaleidoscope,
}

#[pymethods]
impl PyKaleidoscope {
    #[new]
    #[pyo3(signature = (k, m, n, max_iterations=100, min_iterations=0))]
    fn new(k: i32, m: i32, n: i32, max_iterations: usize, min_iterations: usize) -> PyResult<Self> {
        let limits = IterationLimits {
            max_iterations,
            min_iterations,
        };
        Ok(Self {
            inner: Kaleidoscope::from_orders(k, m, n, limits)?,
        })
    }

    /// "elliptic", "euclidean", "hyperbolic", or None without a triangle.
    #[getter]
    fn geometry(&self) -> Option<&'static str> {
        self.inner.geometry().map(|g| g.name())
    }

    #[getter]
    fn orbifold(&self) -> String {
        self.inner.group().to_string()
    }

    fn fold<'py>(&self, py: Python<'py>, map: PyReadonlyArray3<f32>) -> PyResult<&'py PyArray3<f32>> {
        let (output, _) = self.inner.fold_field_copy(map.as_array())?;
        Ok(output.into_pyarray(py))
    }

    /// Returns `(reduced, invalidated, skipped)`.
    fn fold_inplace(&self, mut map: PyReadwriteArray3<f32>) -> PyResult<(usize, usize, usize)> {
        let summary = self.inner.fold_field_inplace(map.as_array_mut())?;
        Ok(summary_tuple(summary))
    }

    fn fold_point(&self, x: f32, y: f32, parity: f32) -> (f32, f32, f32) {
        let [x, y, parity] = self.inner.fold_point([x, y, parity]);
        (x, y, parity)
    }

    fn __repr__(&self) -> String {
        match self.inner.geometry() {
            Some(geometry) => format!("Kaleidoscope({}, {})", self.inner.group(), geometry.name()),
            None => format!("Kaleidoscope({})", self.inner.group()),
        }
    }
}

/// newMap = basic_kaleidoscope(map, k, m, n)
#[pyfunction]
#[pyo3(signature = (map, k, m, n, max_iterations=100, min_iterations=0))]
pub fn basic_kaleidoscope<'py>(
    py: Python<'py>,
    map: PyReadonlyArray3<f32>,
    k: i32,
    m: i32,
    n: i32,
    max_iterations: usize,
    min_iterations: usize,
) -> PyResult<&'py PyArray3<f32>> {
    let kaleidoscope = PyKaleidoscope::new(k, m, n, max_iterations, min_iterations)?;
    kaleidoscope.fold(py, map)
}

/// basic_kaleidoscope_inplace(map, k, m, n)
#[pyfunction]
#[pyo3(signature = (map, k, m, n, max_iterations=100, min_iterations=0))]
pub fn basic_kaleidoscope_inplace(
    map: PyReadwriteArray3<f32>,
    k: i32,
    m: i32,
    n: i32,
    max_iterations: usize,
    min_iterations: usize,
) -> PyResult<(usize, usize, usize)> {
    let kaleidoscope = PyKaleidoscope::new(k, m, n, max_iterations, min_iterations)?;
    kaleidoscope.fold_inplace(map)
}

fn rosette_kaleidoscope(k: i32, angle: f32, center_x: f32, center_y: f32) -> PyResult<Kaleidoscope> {
    let frame = Frame::new(angle, (center_x, center_y))?;
    Ok(Kaleidoscope::from_orders(k, 0, 0, IterationLimits::default())?.with_frame(frame))
}

/// newMap = rosette(map, k, angle, center_x, center_y)
#[pyfunction]
#[pyo3(signature = (map, k, angle=0.0, center_x=0.0, center_y=0.0))]
pub fn rosette<'py>(
    py: Python<'py>,
    map: PyReadonlyArray3<f32>,
    k: i32,
    angle: f32,
    center_x: f32,
    center_y: f32,
) -> PyResult<&'py PyArray3<f32>> {
    let kaleidoscope = rosette_kaleidoscope(k, angle, center_x, center_y)?;
    let (output, _) = kaleidoscope.fold_field_copy(map.as_array())?;
    Ok(output.into_pyarray(py))
}

/// rosette_inplace(map, k, angle, center_x, center_y)
#[pyfunction]
#[pyo3(signature = (map, k, angle=0.0, center_x=0.0, center_y=0.0))]
pub fn rosette_inplace(
    mut map: PyReadwriteArray3<f32>,
    k: i32,
    angle: f32,
    center_x: f32,
    center_y: f32,
) -> PyResult<(usize, usize, usize)> {
    let kaleidoscope = rosette_kaleidoscope(k, angle, center_x, center_y)?;
    let summary = kaleidoscope.fold_field_inplace(map.as_array_mut())?;
    Ok(summary_tuple(summary))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_class::<PyKaleidoscope>()?;
    m.add_function(wrap_pyfunction!(basic_kaleidoscope, m)?)?;
    m.add_function(wrap_pyfunction!(basic_kaleidoscope_inplace, m)?)?;
    m.add_function(wrap_pyfunction!(rosette, m)?)?;
    m.add_function(wrap_pyfunction!(rosette_inplace, m)?)?;
    Ok(())
}
