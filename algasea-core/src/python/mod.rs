//! Python bindings
//!
//! Profiles are built from plain dicts through `pythonize`, so Python callers
//! get the same validation as Rust callers. Every [`AlgaeError`] surfaces as a
//! `ValueError`.

use crate::engine::ViabilityEngine;
use crate::errors::AlgaeError;
use crate::metrics::MetricsResult;
use crate::parameters::EngineParameters;
use crate::presets;
use crate::profiles::{EnvironmentProfile, OperationProfile, StrainProfile};
use crate::sweep::{compare_strains, Sweep, SweepParameter};
use crate::FloatValue;
use numpy::ToPyArray;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

impl From<AlgaeError> for PyErr {
    fn from(e: AlgaeError) -> PyErr {
        PyValueError::new_err(e.to_string())
    }
}

/// Expose a validated profile to Python as a class built from a dict.
macro_rules! create_profile_class {
    ($class:ident, $py_name:literal, $profile:ty) => {
        #[pyclass]
        #[pyo3(name = $py_name)]
        #[derive(Clone)]
        pub struct $class(pub $profile);

        #[pymethods]
        impl $class {
            #[new]
            pub fn new(parameters: Bound<PyAny>) -> PyResult<Self> {
                pythonize::depythonize::<$profile>(&parameters)
                    .map(Self)
                    .map_err(|e| PyValueError::new_err(format!("{}", e)))
            }

            pub fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
                pythonize::pythonize(py, &self.0)
                    .map_err(|e| PyValueError::new_err(format!("{}", e)))
            }

            fn __repr__(&self) -> String {
                format!("{:?}", self.0)
            }
        }
    };
}

create_profile_class!(PyStrain, "Strain", StrainProfile);
create_profile_class!(PyEnvironment, "Environment", EnvironmentProfile);
create_profile_class!(PyOperation, "Operation", OperationProfile);

#[pymethods]
impl PyStrain {
    /// One of the reference strains, by identifier.
    #[staticmethod]
    pub fn preset(name: &str) -> PyResult<Self> {
        presets::strains()
            .shift_remove(name)
            .map(Self)
            .ok_or_else(|| PyValueError::new_err(format!("Unknown strain preset `{}`", name)))
    }

    #[getter]
    pub fn name(&self) -> &str {
        self.0.name()
    }
}

#[pymethods]
impl PyEnvironment {
    /// One of the reference environments, by identifier.
    #[staticmethod]
    pub fn preset(name: &str) -> PyResult<Self> {
        presets::environments()
            .shift_remove(name)
            .map(Self)
            .ok_or_else(|| {
                PyValueError::new_err(format!("Unknown environment preset `{}`", name))
            })
    }
}

#[pymethods]
impl PyOperation {
    #[staticmethod]
    pub fn reference() -> Self {
        Self(presets::reference_operation())
    }
}

fn metrics_to_dict<'py>(py: Python<'py>, metrics: &MetricsResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (name, value) in metrics.iter() {
        dict.set_item(name, value)?;
    }
    Ok(dict)
}

#[pyclass]
#[pyo3(name = "Engine")]
pub struct PyEngine(pub ViabilityEngine);

#[pymethods]
impl PyEngine {
    /// Build an engine, optionally overriding parameters with a dict.
    #[new]
    #[pyo3(signature = (parameters=None))]
    pub fn new(parameters: Option<Bound<PyAny>>) -> PyResult<Self> {
        let parameters = match parameters {
            Some(parameters) => pythonize::depythonize::<EngineParameters>(&parameters)
                .map_err(|e| PyValueError::new_err(format!("{}", e)))?,
            None => EngineParameters::default(),
        };
        Ok(Self(ViabilityEngine::from_parameters(parameters)?))
    }

    #[staticmethod]
    pub fn from_toml(source: &str) -> PyResult<Self> {
        let parameters = EngineParameters::from_toml_str(source)?;
        Ok(Self(ViabilityEngine::from_parameters(parameters)?))
    }

    pub fn evaluate<'py>(
        &self,
        py: Python<'py>,
        strain: &PyStrain,
        environment: &PyEnvironment,
        operation: &PyOperation,
    ) -> PyResult<Bound<'py, PyDict>> {
        let metrics = self.0.evaluate(&strain.0, &environment.0, &operation.0)?;
        metrics_to_dict(py, &metrics)
    }

    /// Evaluate one parameter over `values`.
    ///
    /// Returns a dict of numpy arrays: the swept values under `"value"` and
    /// one array per metric, with NaN where a value could not be evaluated.
    pub fn sweep<'py>(
        &self,
        py: Python<'py>,
        strain: &PyStrain,
        environment: &PyEnvironment,
        operation: &PyOperation,
        parameter: &str,
        values: Vec<FloatValue>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let sweep = Sweep::new(
            strain.0.clone(),
            environment.0.clone(),
            operation.0.clone(),
            SweepParameter::from_name(parameter)?,
            values,
        );
        let results = py.allow_threads(|| sweep.run_parallel(&self.0));

        let dict = PyDict::new(py);
        dict.set_item("value", results.values().to_pyarray(py))?;
        for (name, column) in results.columns() {
            dict.set_item(name, column.to_pyarray(py))?;
        }
        Ok(dict)
    }

    /// Evaluate several strains at one site, keyed by strain name.
    ///
    /// Strains whose cost is undefined map to `None`.
    pub fn compare<'py>(
        &self,
        py: Python<'py>,
        strains: Vec<PyStrain>,
        environment: &PyEnvironment,
        operation: &PyOperation,
    ) -> PyResult<Bound<'py, PyDict>> {
        let strains: Vec<StrainProfile> = strains.into_iter().map(|s| s.0).collect();
        let results = compare_strains(&self.0, &strains, &environment.0, &operation.0);

        let dict = PyDict::new(py);
        for (name, outcome) in results {
            match outcome {
                Ok(metrics) => dict.set_item(name, metrics_to_dict(py, &metrics)?)?,
                Err(AlgaeError::UndefinedCost { .. }) => dict.set_item(name, py.None())?,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(dict)
    }
}

#[pymodule]
pub fn core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyStrain>()?;
    m.add_class::<PyEnvironment>()?;
    m.add_class::<PyOperation>()?;
    m.add_class::<PyEngine>()?;
    Ok(())
}
