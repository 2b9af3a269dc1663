use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::coalesce::Coalescer;
use crate::core::config::CoalescenceConfig;
use crate::core::particle::FourMomentum;
use crate::core::random::SeededStream;

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Convert an (N, 3) momentum array into on-shell 4-momenta of rest mass `mass`.
fn momenta_from_array(
    name: &str,
    arr: &PyReadonlyArray2<'_, f64>,
    mass: f64,
) -> PyResult<Vec<FourMomentum>> {
    let view = arr.as_array();
    if view.ncols() != 3 {
        return Err(py_err(format!(
            "{name} must have shape (N, 3), got {:?}",
            view.shape()
        )));
    }
    let mut out = Vec::with_capacity(view.nrows());
    for row in view.rows() {
        let p = [row[0], row[1], row[2]];
        if !p.iter().all(|x| x.is_finite()) {
            return Err(py_err(format!("{name} momenta must be finite")));
        }
        out.push(FourMomentum::from_momentum(p, mass));
    }
    Ok(out)
}

/// Python-facing wrapper around the Rust [`Coalescer`].
///
/// API:
/// - __new__(seed=None, spin_scale=1.0, max_delta_p=0.2)
/// - process_event(protons, neutrons, antiprotons, antineutrons) -> np.ndarray, shape (M, 4)
/// - events_processed() -> int
#[pyclass(name = "Coalescer")]
pub struct PyCoalescer {
    inner: Coalescer<SeededStream>,
}

#[pymethods]
impl PyCoalescer {
    /// Create a coalescer with the default physical constants.
    ///
    /// Parameters
    /// - seed: RNG seed (int) for reproducibility; None for nondeterministic
    /// - spin_scale: factor applied to every probability, in (0, 1]
    /// - max_delta_p: momentum window in GeV/c (> 0)
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (seed=None, spin_scale=1.0, max_delta_p=0.2))]
    fn new(seed: Option<u64>, spin_scale: f64, max_delta_p: f64) -> PyResult<Self> {
        let config = CoalescenceConfig {
            spin_scale,
            max_delta_p,
            ..CoalescenceConfig::default()
        };
        let inner = Coalescer::new(config, SeededStream::new(seed)).map_err(py_err)?;
        Ok(Self { inner })
    }

    /// Coalesce one event given (N, 3) 3-momentum arrays in GeV/c.
    ///
    /// Returns an (M, 4) array of [pdg, pT, pz, eta], deuterons first.
    fn process_event<'py>(
        &mut self,
        py: Python<'py>,
        protons: PyReadonlyArray2<'py, f64>,
        neutrons: PyReadonlyArray2<'py, f64>,
        antiprotons: PyReadonlyArray2<'py, f64>,
        antineutrons: PyReadonlyArray2<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let cfg = *self.inner.config();
        let p = momenta_from_array("protons", &protons, cfg.proton_mass)?;
        let n = momenta_from_array("neutrons", &neutrons, cfg.neutron_mass)?;
        let ap = momenta_from_array("antiprotons", &antiprotons, cfg.proton_mass)?;
        let an = momenta_from_array("antineutrons", &antineutrons, cfg.neutron_mass)?;

        let inner = &mut self.inner;
        let out = py.detach(|| inner.process_momenta(&p, &n, &ap, &an));

        let mut arr = Array2::<f64>::zeros((out.len(), 4));
        for (i, r) in out.records().enumerate() {
            arr[[i, 0]] = r.pdg as f64;
            arr[[i, 1]] = r.pt;
            arr[[i, 2]] = r.pz;
            arr[[i, 3]] = r.eta;
        }
        Ok(arr.into_pyarray(py))
    }

    /// Number of events processed so far.
    fn events_processed(&self) -> u64 {
        self.inner.events_processed()
    }
}

/// The coalsim Python module entry point.
#[pymodule]
fn coalsim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCoalescer>()?;
    Ok(())
}
