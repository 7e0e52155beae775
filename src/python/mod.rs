//! Python bindings for the emissions calculator.
//!
//! Exposes an `EmissionsCalculator` class that accepts the same labels as the
//! dashboard (e.g. `"TRUCK"`, `"DIESEL"`, `"SNOW_ICE"`) and returns an
//! `EmissionResult`. A catalogue miss raises `FactorNotFoundError`.
//!
//! Example:
//!     calculator = EmissionsCalculator()
//!     result = calculator.calculate(100.0, 10.0, "TRUCK", "DIESEL", capacity_utilization=45.0)
//!     result.total_co2e

use cfip_calculator::{EmissionResult, EmissionsCalculator, ShipmentRequest};
use cfip_core::config::CFIPConfig;
use cfip_core::errors::CFIPError;
use cfip_core::factors::EmissionFactorTable;
use cfip_core::FloatValue;
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyOSError, PyValueError};
use pyo3::prelude::*;

create_exception!(cfip, FactorNotFoundError, PyException);

fn to_py_err(err: CFIPError) -> PyErr {
    match err {
        CFIPError::FactorNotFound { .. } => FactorNotFoundError::new_err(err.to_string()),
        CFIPError::Io(_) => PyOSError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Emissions of a single shipment. All masses are in kg.
#[pyclass]
#[pyo3(name = "EmissionResult")]
#[derive(Debug, Clone)]
pub struct PyEmissionResult(pub EmissionResult);

#[pymethods]
impl PyEmissionResult {
    #[getter]
    fn co2(&self) -> FloatValue {
        self.0.co2
    }

    #[getter]
    fn ch4(&self) -> FloatValue {
        self.0.ch4
    }

    #[getter]
    fn n2o(&self) -> FloatValue {
        self.0.n2o
    }

    /// Total in kg CO2e, including the aviation multiplier
    #[getter]
    fn total_co2e(&self) -> FloatValue {
        self.0.total_co2e
    }

    #[getter]
    fn scope(&self) -> &'static str {
        self.0.scope.label()
    }

    /// CO2 factor used, in kg CO2 / (t km)
    #[getter]
    fn emission_factor(&self) -> FloatValue {
        self.0.emission_factor
    }

    #[getter]
    fn base(&self) -> FloatValue {
        self.0.breakdown.base
    }

    #[getter]
    fn weather_adjustment(&self) -> FloatValue {
        self.0.breakdown.weather_adjustment
    }

    #[getter]
    fn load_adjustment(&self) -> FloatValue {
        self.0.breakdown.load_adjustment
    }

    #[getter]
    fn traffic_adjustment(&self) -> FloatValue {
        self.0.breakdown.traffic_adjustment
    }

    fn __repr__(&self) -> String {
        format!(
            "EmissionResult(total_co2e={}, co2={}, ch4={}, n2o={}, scope={})",
            self.0.total_co2e,
            self.0.co2,
            self.0.ch4,
            self.0.n2o,
            self.0.scope
        )
    }
}

/// Emissions calculator over an emission-factor catalogue.
///
/// The default constructor uses the seeded reference catalogue.
#[pyclass]
#[pyo3(name = "EmissionsCalculator")]
pub struct PyEmissionsCalculator(EmissionsCalculator<EmissionFactorTable>);

#[pymethods]
impl PyEmissionsCalculator {
    #[new]
    fn new() -> Self {
        Self(EmissionsCalculator::seeded())
    }

    /// Create a calculator from the contents of a TOML configuration
    #[staticmethod]
    fn from_toml(contents: String) -> PyResult<Self> {
        let config = CFIPConfig::from_toml_str(&contents).map_err(to_py_err)?;
        let calculator = EmissionsCalculator::from_config(&config).map_err(to_py_err)?;
        Ok(Self(calculator))
    }

    /// Create a calculator from a TOML configuration file
    #[staticmethod]
    fn from_file(path: String) -> PyResult<Self> {
        let config = CFIPConfig::from_path(path).map_err(to_py_err)?;
        let calculator = EmissionsCalculator::from_config(&config).map_err(to_py_err)?;
        Ok(Self(calculator))
    }

    /// Calculate the emissions of a shipment
    #[pyo3(signature = (distance, weight, transport_mode, fuel_type, weather_condition=None, capacity_utilization=None, departure_hour=None, day_of_week=None))]
    #[allow(clippy::too_many_arguments)]
    fn calculate(
        &self,
        distance: FloatValue,
        weight: FloatValue,
        transport_mode: String,
        fuel_type: String,
        weather_condition: Option<String>,
        capacity_utilization: Option<FloatValue>,
        departure_hour: Option<u8>,
        day_of_week: Option<u8>,
    ) -> PyResult<PyEmissionResult> {
        let request = ShipmentRequest {
            distance,
            weight,
            transport_mode,
            fuel_type,
            weather_condition,
            capacity_utilization,
            departure_hour,
            day_of_week,
            ..ShipmentRequest::default()
        };
        self.0
            .calculate_labelled(&request)
            .map(PyEmissionResult)
            .map_err(to_py_err)
    }
}

#[pymodule]
#[pyo3(name = "_lib")]
fn cfip(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyEmissionsCalculator>()?;
    m.add_class::<PyEmissionResult>()?;
    m.add(
        "FactorNotFoundError",
        m.py().get_type_bound::<FactorNotFoundError>(),
    )?;
    Ok(())
}
