//! Operational adjustment curves.
//!
//! Each curve returns a dimensionless fractional addition to the base
//! emissions (0.05 means +5%). The three factors are combined additively, see
//! [`AdjustmentFactors::total`].
//!
//! # Weather
//!
//! | Condition | Factor |
//! |-----------|--------|
//! | NORMAL | 0.00 |
//! | LIGHT_ADVERSE | 0.03 |
//! | HEAVY_ADVERSE | 0.05 |
//! | SNOW_ICE | 0.10 |
//! | EXTREME | 0.15 |
//!
//! # Load
//!
//! Step function of capacity utilisation, the first threshold met from the top:
//!
//! | Utilisation | Factor |
//! |-------------|--------|
//! | >= 90% | 0.00 |
//! | >= 80% | 0.05 |
//! | >= 70% | 0.10 |
//! | >= 60% | 0.15 |
//! | >= 50% | 0.20 |
//! | < 50% | 0.30 |
//!
//! # Traffic
//!
//! Only applied when the departure slot is known, see [`TrafficPeriod`].

use cfip_core::transport::WeatherCondition;
use cfip_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Capacity utilisation assumed when none is given
/// unit: %
pub const DEFAULT_CAPACITY_UTILIZATION: FloatValue = 100.0;

/// Weather adjustment for a route condition.
pub fn weather_factor(condition: WeatherCondition) -> FloatValue {
    match condition {
        WeatherCondition::Normal => 0.0,
        WeatherCondition::LightAdverse => 0.03,
        WeatherCondition::HeavyAdverse => 0.05,
        WeatherCondition::SnowIce => 0.10,
        WeatherCondition::Extreme => 0.15,
    }
}

/// Load adjustment for a capacity utilisation percentage.
///
/// Values outside 0-100 are not rejected, they fall into the outermost buckets.
pub fn load_factor(capacity_utilization: FloatValue) -> FloatValue {
    if capacity_utilization >= 90.0 {
        0.0
    } else if capacity_utilization >= 80.0 {
        0.05
    } else if capacity_utilization >= 70.0 {
        0.10
    } else if capacity_utilization >= 60.0 {
        0.15
    } else if capacity_utilization >= 50.0 {
        0.20
    } else {
        0.30
    }
}

/// Departure hour and day of week, which are only meaningful together.
///
/// `day_of_week` counts from Sunday = 0, so Monday to Friday are 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureSlot {
    /// Hour of departure, 0-23
    pub departure_hour: u8,
    /// Day of week, 0 (Sunday) - 6 (Saturday)
    pub day_of_week: u8,
}

impl DepartureSlot {
    pub fn new(departure_hour: u8, day_of_week: u8) -> Self {
        Self {
            departure_hour,
            day_of_week,
        }
    }

    /// Build a slot only when both halves are known.
    pub fn from_parts(departure_hour: Option<u8>, day_of_week: Option<u8>) -> Option<Self> {
        match (departure_hour, day_of_week) {
            (Some(hour), Some(day)) => Some(Self::new(hour, day)),
            _ => None,
        }
    }

    pub fn is_weekday(&self) -> bool {
        (1..=5).contains(&self.day_of_week)
    }

    pub fn period(&self) -> TrafficPeriod {
        if !self.is_weekday() {
            return TrafficPeriod::Weekend;
        }
        match self.departure_hour {
            h if h >= 22 || h < 6 => TrafficPeriod::Night,
            6..=8 | 15..=17 => TrafficPeriod::Peak,
            9..=14 => TrafficPeriod::Midday,
            _ => TrafficPeriod::Evening,
        }
    }
}

/// Traffic regime a shipment departs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficPeriod {
    /// Saturday or Sunday, any hour
    Weekend,
    /// Weekday 22:00-06:00
    Night,
    /// Weekday 06:00-09:00 and 15:00-18:00
    Peak,
    /// Weekday 09:00-15:00
    Midday,
    /// Weekday 18:00-22:00
    Evening,
}

impl TrafficPeriod {
    pub fn factor(&self) -> FloatValue {
        match self {
            TrafficPeriod::Weekend => 0.05,
            TrafficPeriod::Night => 0.0,
            TrafficPeriod::Peak => 0.15,
            TrafficPeriod::Midday => 0.05,
            TrafficPeriod::Evening => 0.10,
        }
    }
}

/// Traffic adjustment, zero when the departure slot is unknown.
pub fn traffic_factor(slot: Option<DepartureSlot>) -> FloatValue {
    slot.map_or(0.0, |slot| slot.period().factor())
}

/// The three fractional adjustments applied to a shipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFactors {
    pub weather: FloatValue,
    pub load: FloatValue,
    pub traffic: FloatValue,
}

impl AdjustmentFactors {
    pub fn new(
        weather: WeatherCondition,
        capacity_utilization: FloatValue,
        departure: Option<DepartureSlot>,
    ) -> Self {
        Self {
            weather: weather_factor(weather),
            load: load_factor(capacity_utilization),
            traffic: traffic_factor(departure),
        }
    }

    /// Additive combination of all factors.
    ///
    /// Not clamped: severe combinations may exceed 1.0.
    pub fn total(&self) -> FloatValue {
        self.weather + self.load + self.traffic
    }
}
