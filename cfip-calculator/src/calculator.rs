//! Shipment emissions calculator
//!
//! Converts the physical parameters of a shipment into greenhouse-gas emissions.
//!
//! # Algorithm
//!
//! 1. Base mass of each gas from the tonne-kilometres moved:
//!    $$m_{gas} = d \cdot w \cdot EF_{gas}$$
//!    with the CH4 and N2O factors converted from g to kg.
//! 2. Weather, load and traffic factors are summed into a single adjustment
//!    $a$ and every gas is scaled by $(1 + a)$.
//! 3. The adjusted masses are combined via GWP into kg CO2e.
//! 4. Air freight has the CO2e total scaled by the radiative forcing multiplier.
//! 5. Emissions are classified as Scope 3.
//!
//! Because the adjustments are additive, the breakdown terms always sum to the
//! adjusted CO2 mass.

use crate::adjustments::{AdjustmentFactors, DepartureSlot, DEFAULT_CAPACITY_UTILIZATION};
use crate::request::parse_weather;
use cfip_core::config::CFIPConfig;
use cfip_core::errors::{CFIPError, CFIPResult};
use cfip_core::factors::{EmissionFactorLookup, EmissionFactorTable, GRAMS_PER_KILOGRAM};
use cfip_core::parameters::CalculatorParameters;
use cfip_core::transport::{FuelType, Scope, TransportMode, WeatherCondition};
use cfip_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters of a single shipment.
///
/// Distance and weight are not validated: zero gives zero emissions and
/// negative values propagate through the arithmetic.
///
/// Serialised with flat camelCase fields (`departureHour`, `dayOfWeek`), see
/// [`CalculationInputFields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CalculationInputFields", into = "CalculationInputFields")]
pub struct CalculationInput {
    /// unit: km
    pub distance: FloatValue,
    /// unit: t
    pub weight: FloatValue,
    pub transport_mode: TransportMode,
    pub fuel_type: FuelType,
    pub weather_condition: WeatherCondition,
    /// unit: %
    /// default: 100
    pub capacity_utilization: Option<FloatValue>,
    pub departure: Option<DepartureSlot>,
}

/// Wire layout of a [`CalculationInput`].
///
/// An unknown weather label deserialises as `NORMAL`, and the departure slot is
/// only formed when both `departureHour` and `dayOfWeek` are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInputFields {
    pub distance: FloatValue,
    pub weight: FloatValue,
    pub transport_mode: TransportMode,
    pub fuel_type: FuelType,
    #[serde(default)]
    pub weather_condition: Option<String>,
    #[serde(default)]
    pub capacity_utilization: Option<FloatValue>,
    #[serde(default)]
    pub departure_hour: Option<u8>,
    #[serde(default)]
    pub day_of_week: Option<u8>,
}

impl From<CalculationInputFields> for CalculationInput {
    fn from(fields: CalculationInputFields) -> Self {
        Self {
            distance: fields.distance,
            weight: fields.weight,
            transport_mode: fields.transport_mode,
            fuel_type: fields.fuel_type,
            weather_condition: parse_weather(fields.weather_condition.as_deref()),
            capacity_utilization: fields.capacity_utilization,
            departure: DepartureSlot::from_parts(fields.departure_hour, fields.day_of_week),
        }
    }
}

impl From<CalculationInput> for CalculationInputFields {
    fn from(input: CalculationInput) -> Self {
        Self {
            distance: input.distance,
            weight: input.weight,
            transport_mode: input.transport_mode,
            fuel_type: input.fuel_type,
            weather_condition: Some(input.weather_condition.label().to_string()),
            capacity_utilization: input.capacity_utilization,
            departure_hour: input.departure.map(|slot| slot.departure_hour),
            day_of_week: input.departure.map(|slot| slot.day_of_week),
        }
    }
}

impl CalculationInput {
    pub fn new(
        distance: FloatValue,
        weight: FloatValue,
        transport_mode: TransportMode,
        fuel_type: FuelType,
    ) -> Self {
        Self {
            distance,
            weight,
            transport_mode,
            fuel_type,
            weather_condition: WeatherCondition::default(),
            capacity_utilization: None,
            departure: None,
        }
    }

    pub fn with_weather(mut self, weather_condition: WeatherCondition) -> Self {
        self.weather_condition = weather_condition;
        self
    }

    pub fn with_capacity_utilization(mut self, capacity_utilization: FloatValue) -> Self {
        self.capacity_utilization = Some(capacity_utilization);
        self
    }

    pub fn with_departure(mut self, departure_hour: u8, day_of_week: u8) -> Self {
        self.departure = Some(DepartureSlot::new(departure_hour, day_of_week));
        self
    }

    /// Tonne-kilometres moved
    /// unit: t km
    pub fn tonne_km(&self) -> FloatValue {
        self.distance * self.weight
    }

    /// Capacity utilisation used for the load adjustment
    ///
    /// Absent or non-finite values count as fully loaded.
    /// unit: %
    pub fn effective_capacity_utilization(&self) -> FloatValue {
        self.capacity_utilization
            .filter(|value| value.is_finite())
            .unwrap_or(DEFAULT_CAPACITY_UTILIZATION)
    }

    pub fn adjustment_factors(&self) -> AdjustmentFactors {
        AdjustmentFactors::new(
            self.weather_condition,
            self.effective_capacity_utilization(),
            self.departure,
        )
    }
}

/// Adjustment contributions to the CO2 mass, each in kg CO2.
///
/// Every term is computed from the unadjusted CO2 mass, so
/// `base + weather_adjustment + load_adjustment + traffic_adjustment`
/// equals the adjusted CO2 mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionBreakdown {
    pub base: FloatValue,
    pub weather_adjustment: FloatValue,
    pub load_adjustment: FloatValue,
    pub traffic_adjustment: FloatValue,
}

impl EmissionBreakdown {
    fn from_base(base: FloatValue, factors: &AdjustmentFactors) -> Self {
        Self {
            base,
            weather_adjustment: base * factors.weather,
            load_adjustment: base * factors.load,
            traffic_adjustment: base * factors.traffic,
        }
    }

    pub fn total(&self) -> FloatValue {
        self.base + self.weather_adjustment + self.load_adjustment + self.traffic_adjustment
    }

    /// Recover the fractional factors from the absolute adjustments.
    ///
    /// A zero base gives zero factors.
    pub fn adjustment_factors(&self) -> AdjustmentFactors {
        let ratio = |adjustment: FloatValue| {
            let value = adjustment / self.base;
            if value.is_finite() {
                value
            } else {
                0.0
            }
        };
        AdjustmentFactors {
            weather: ratio(self.weather_adjustment),
            load: ratio(self.load_adjustment),
            traffic: ratio(self.traffic_adjustment),
        }
    }
}

/// Emissions of a single shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionResult {
    /// Adjusted CO2 mass
    /// unit: kg
    pub co2: FloatValue,
    /// Adjusted CH4 mass
    /// unit: kg
    pub ch4: FloatValue,
    /// Adjusted N2O mass
    /// unit: kg
    pub n2o: FloatValue,
    /// GWP-weighted total, including the aviation multiplier for air freight
    /// unit: kg CO2e
    #[serde(rename = "totalCO2e")]
    pub total_co2e: FloatValue,
    pub scope: Scope,
    pub breakdown: EmissionBreakdown,
    /// CO2 factor used for the calculation
    /// unit: kg CO2 / (t km)
    pub emission_factor: FloatValue,
}

impl EmissionResult {
    pub fn adjustment_factors(&self) -> AdjustmentFactors {
        self.breakdown.adjustment_factors()
    }
}

/// Calculates shipment emissions against an emission-factor source.
///
/// Holds no mutable state, a single calculator can be shared between threads.
#[derive(Debug, Clone)]
pub struct EmissionsCalculator<L> {
    lookup: L,
    parameters: CalculatorParameters,
}

impl Default for EmissionsCalculator<EmissionFactorTable> {
    fn default() -> Self {
        Self::seeded()
    }
}

impl EmissionsCalculator<EmissionFactorTable> {
    /// Create a calculator over the seeded reference catalogue.
    pub fn seeded() -> Self {
        Self::new(EmissionFactorTable::seeded())
    }

    /// Create a calculator from a loaded configuration.
    pub fn from_config(config: &CFIPConfig) -> CFIPResult<Self> {
        Ok(Self::from_parameters(
            config.factor_table()?,
            config.parameters.clone(),
        ))
    }
}

impl<L: EmissionFactorLookup> EmissionsCalculator<L> {
    /// Create a new calculator with default parameters
    pub fn new(lookup: L) -> Self {
        Self::from_parameters(lookup, CalculatorParameters::default())
    }

    pub fn from_parameters(lookup: L, parameters: CalculatorParameters) -> Self {
        Self { lookup, parameters }
    }

    pub fn parameters(&self) -> &CalculatorParameters {
        &self.parameters
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Calculate the emissions of a shipment.
    ///
    /// Fails with [`CFIPError::FactorNotFound`] when the catalogue has no factor
    /// for the shipment's mode and fuel in the configured region.
    pub fn calculate(&self, input: &CalculationInput) -> CFIPResult<EmissionResult> {
        let region = self.parameters.region.as_str();
        let factor = self
            .lookup
            .get_factor(input.transport_mode, input.fuel_type, region)
            .ok_or_else(|| CFIPError::FactorNotFound {
                transport_mode: input.transport_mode.to_string(),
                fuel_type: input.fuel_type.to_string(),
                region: region.to_string(),
            })?;

        let tonne_km = input.tonne_km();
        let base_co2 = tonne_km * factor.co2_factor;
        let base_ch4 = tonne_km * (factor.ch4_factor_or_zero() / GRAMS_PER_KILOGRAM);
        let base_n2o = tonne_km * (factor.n2o_factor_or_zero() / GRAMS_PER_KILOGRAM);

        let factors = input.adjustment_factors();
        let scale = 1.0 + factors.total();

        let co2 = base_co2 * scale;
        let ch4 = base_ch4 * scale;
        let n2o = base_n2o * scale;

        let mut total_co2e = self.parameters.co2_equivalent(co2, ch4, n2o);
        if input.transport_mode == TransportMode::Air {
            total_co2e *= self.parameters.aviation_rf_multiplier;
        }

        Ok(EmissionResult {
            co2,
            ch4,
            n2o,
            total_co2e,
            scope: classify_scope(input.transport_mode),
            breakdown: EmissionBreakdown::from_base(base_co2, &factors),
            emission_factor: factor.co2_factor,
        })
    }
}

/// Reporting scope for contracted freight.
///
/// Scope 1/2 would depend on whether the fleet is owned, which is not modelled.
fn classify_scope(_transport_mode: TransportMode) -> Scope {
    Scope::Scope3
}
