//! Calculator Parameters
//!
//! Numeric policy constants used when combining per-gas emissions into a
//! single CO2-equivalent figure.
//!
//! # Reference
//!
//! GWP values are the IPCC AR5 100-year values without climate-carbon
//! feedbacks. The aviation multiplier approximates the additional warming from
//! contrails, NOx and water vapour emitted at altitude.

use crate::factors::GLOBAL_REGION;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the emissions calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorParameters {
    /// Global warming potential of methane over 100 years
    /// unit: kg CO2e / kg CH4
    /// default: 28.0
    pub gwp_ch4: FloatValue,

    /// Global warming potential of nitrous oxide over 100 years
    /// unit: kg CO2e / kg N2O
    /// default: 265.0
    pub gwp_n2o: FloatValue,

    /// Radiative forcing multiplier applied to the CO2e total of air freight
    /// Only the aggregate is scaled, per-gas masses are reported unscaled.
    /// unit: dimensionless
    /// default: 2.0
    pub aviation_rf_multiplier: FloatValue,

    /// Region used when looking up emission factors
    /// default: "GLOBAL"
    pub region: String,
}

impl Default for CalculatorParameters {
    fn default() -> Self {
        Self {
            gwp_ch4: 28.0,
            gwp_n2o: 265.0,
            aviation_rf_multiplier: 2.0,
            region: GLOBAL_REGION.to_string(),
        }
    }
}

impl CalculatorParameters {
    /// Convert per-gas masses (kg) into kg CO2e, before any mode multiplier.
    ///
    /// $$CO2e = m_{CO2} + GWP_{CH4} \cdot m_{CH4} + GWP_{N2O} \cdot m_{N2O}$$
    pub fn co2_equivalent(&self, co2: FloatValue, ch4: FloatValue, n2o: FloatValue) -> FloatValue {
        co2 + ch4 * self.gwp_ch4 + n2o * self.gwp_n2o
    }
}
