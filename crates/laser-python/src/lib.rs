//! # Laser Python
//!
//! Python-Bindings für den Laser-Sampler.
//! Exponiert `Sampler` mit `ingest(ranges)` → `True`, sobald genug Umdrehungen
//! gesammelt sind, und `convert()` für `(angle, distance)` → `(x, y)`,
//! z.B. zum Plotten mit matplotlib.

use laser_core::{Sample, SamplerState, DEFAULT_ROTATIONS};
use laser_transform::CartesianPoint;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyclass(name = "Sampler")]
struct PySampler {
    inner: laser_core::Sampler,
}

fn to_py_points(points: impl IntoIterator<Item = CartesianPoint>) -> Vec<(f64, f64)> {
    points.into_iter().map(|p| (p.x, p.y)).collect()
}

#[pymethods]
impl PySampler {
    #[new]
    #[pyo3(signature = (rotations=None))]
    fn new(rotations: Option<usize>) -> PyResult<Self> {
        let rotations = rotations.unwrap_or(DEFAULT_ROTATIONS);
        let inner = laser_core::Sampler::with_rotations(rotations).ok_or_else(|| {
            PyValueError::new_err(format!("rotations {rotations} too large: capacity overflow"))
        })?;
        Ok(PySampler { inner })
    }

    /// Nimm einen Messwert aus `ranges` an der aktuellen Cursor-Position.
    /// Gibt `True` zurück, sobald der Sampler terminal ist.
    fn ingest(&mut self, ranges: Vec<f32>) -> bool {
        self.inner.ingest(&ranges) == SamplerState::Terminal
    }

    #[getter]
    fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }

    #[getter]
    fn cursor(&self) -> usize {
        self.inner.cursor()
    }

    #[getter]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Gesammelte Messwerte als Liste von `(angle, distance)`.
    fn history(&self) -> Vec<(usize, f32)> {
        self.inner
            .history()
            .iter()
            .map(|s| (s.angle_index, s.distance))
            .collect()
    }

    /// Gesammelte Messwerte als kartesische `(x, y)`-Punkte.
    fn points(&self) -> Vec<(f64, f64)> {
        to_py_points(laser_transform::convert(self.inner.history().as_slice()))
    }
}

/// Wandle `(angle, distance)`-Paare in `(x, y)`-Punkte um.
#[pyfunction]
fn convert(samples: Vec<(usize, f32)>) -> Vec<(f64, f64)> {
    to_py_points(samples.into_iter().map(Sample::from).map(CartesianPoint::from))
}

#[pymodule]
fn laser_map(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySampler>()?;
    m.add_function(wrap_pyfunction!(convert, m)?)?;
    Ok(())
}
