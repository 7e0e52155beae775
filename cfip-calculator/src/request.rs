//! Shipment requests as submitted by the dashboard.
//!
//! The dashboard sends transport mode, fuel type and weather as free-form
//! labels. A [`ShipmentRequest`] keeps them as received and is converted into a
//! typed [`CalculationInput`] right before calculating:
//!
//! - an unrecognised mode or fuel label has no emission factor, so it is
//!   reported as [`CFIPError::FactorNotFound`], exactly like a catalogue miss
//! - an unrecognised weather label falls back to `NORMAL`
//! - the traffic adjustment is only used when both the departure hour and the
//!   day of week are present

use crate::adjustments::DepartureSlot;
use crate::calculator::{CalculationInput, EmissionResult, EmissionsCalculator};
use cfip_core::errors::{CFIPError, CFIPResult};
use cfip_core::factors::EmissionFactorLookup;
use cfip_core::transport::WeatherCondition;
use cfip_core::FloatValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    /// unit: km
    pub distance: FloatValue,
    /// unit: t
    pub weight: FloatValue,
    #[serde(default)]
    pub transport_mode: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub weather_condition: Option<String>,
    /// unit: %
    #[serde(default)]
    pub capacity_utilization: Option<FloatValue>,
    #[serde(default)]
    pub departure_hour: Option<u8>,
    #[serde(default)]
    pub day_of_week: Option<u8>,
}

impl ShipmentRequest {
    /// Check that the descriptive fields the dashboard requires are present.
    pub fn validate(&self) -> CFIPResult<()> {
        let required = [
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("transportMode", &self.transport_mode),
            ("fuelType", &self.fuel_type),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CFIPError::MissingField(name));
            }
        }
        Ok(())
    }

    /// Convert into a typed calculation input.
    ///
    /// Unknown mode and fuel labels are returned as
    /// [`CFIPError::UnknownTransportMode`] / [`CFIPError::UnknownFuelType`].
    /// The descriptive fields are not checked, see [`ShipmentRequest::validate`].
    pub fn to_input(&self) -> CFIPResult<CalculationInput> {
        let mut input = CalculationInput::new(
            self.distance,
            self.weight,
            self.transport_mode.parse()?,
            self.fuel_type.parse()?,
        )
        .with_weather(parse_weather(self.weather_condition.as_deref()));
        input.capacity_utilization = self.capacity_utilization;
        input.departure = DepartureSlot::from_parts(self.departure_hour, self.day_of_week);
        Ok(input)
    }
}

/// Weather label to condition, unknown labels count as `NORMAL`.
pub fn parse_weather(label: Option<&str>) -> WeatherCondition {
    match label {
        None => WeatherCondition::Normal,
        Some(label) => label.parse().unwrap_or_else(|_| {
            log::debug!("Unknown weather condition {:?}, using NORMAL", label);
            WeatherCondition::Normal
        }),
    }
}

impl<L: EmissionFactorLookup> EmissionsCalculator<L> {
    /// Calculate the emissions of a dashboard request.
    pub fn calculate_request(&self, request: &ShipmentRequest) -> CFIPResult<EmissionResult> {
        request.validate()?;
        self.calculate_labelled(request)
    }

    /// Calculate from the labels of a request without requiring origin and
    /// destination.
    pub fn calculate_labelled(&self, request: &ShipmentRequest) -> CFIPResult<EmissionResult> {
        let input = request.to_input().map_err(|err| match err {
            CFIPError::UnknownTransportMode(_) | CFIPError::UnknownFuelType(_) => {
                CFIPError::FactorNotFound {
                    transport_mode: request.transport_mode.clone(),
                    fuel_type: request.fuel_type.clone(),
                    region: self.parameters().region.clone(),
                }
            }
            other => other,
        })?;
        self.calculate(&input)
    }
}
