//! TOML configuration.
//!
//! A configuration file may override calculator parameters and supply its own
//! factor catalogue:
//!
//! ```toml
//! [parameters]
//! gwp_ch4 = 28.0
//! region = "GLOBAL"
//!
//! [[factors]]
//! transport_mode = "TRUCK"
//! fuel_type = "DIESEL"
//! co2_factor = 0.097
//! ch4_factor = 0.0015
//! n2o_factor = 0.0032
//! source = "EPA"
//! year = 2024
//! ```
//!
//! Every section is optional. Without any `[[factors]]` the seeded catalogue is
//! used.

use crate::errors::CFIPResult;
use crate::factors::{EmissionFactor, EmissionFactorTable};
use crate::parameters::CalculatorParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CFIPConfig {
    #[serde(default)]
    pub parameters: CalculatorParameters,
    #[serde(default)]
    pub factors: Vec<EmissionFactor>,
}

impl CFIPConfig {
    pub fn from_toml_str(contents: &str) -> CFIPResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CFIPResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Factor catalogue described by this configuration.
    ///
    /// Falls back to the seeded catalogue when no factors are configured.
    pub fn factor_table(&self) -> CFIPResult<EmissionFactorTable> {
        if self.factors.is_empty() {
            Ok(EmissionFactorTable::seeded())
        } else {
            EmissionFactorTable::from_factors(self.factors.iter().cloned())
        }
    }
}
