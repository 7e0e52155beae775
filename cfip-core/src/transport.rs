//! Shipment classification enums.
//!
//! Every enum here has a canonical SCREAMING_SNAKE_CASE label (e.g. `HEAVY_FUEL_OIL`).
//! The same label is used for serde, [`Display`](std::fmt::Display) and
//! [`FromStr`](std::str::FromStr), so records loaded from configuration, values
//! submitted by the dashboard and values printed in reports all agree.

use crate::errors::{CFIPError, CFIPResult};
use serde::{Deserialize, Serialize};

/// Implements `ALL`, `label`, `Display` and `FromStr` for a fieldless enum.
///
/// `$err` names the [`CFIPError`] variant returned for an unrecognised label.
macro_rules! labelled_enum {
    ($ty:ident, $err:ident, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Canonical label for this variant.
            pub fn label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = CFIPError;

            fn from_str(s: &str) -> CFIPResult<Self> {
                match s {
                    $($label => Ok($ty::$variant),)+
                    other => Err(CFIPError::$err(other.to_string())),
                }
            }
        }
    };
}

/// Mode of transport for a shipment leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Truck,
    Rail,
    Ship,
    Air,
    /// Reserved for shipments combining several legs.
    ///
    /// No factors are seeded for it, so calculating a multimodal shipment
    /// directly fails with a factor lookup miss.
    Multimodal,
}

labelled_enum!(TransportMode, UnknownTransportMode, {
    Truck => "TRUCK",
    Rail => "RAIL",
    Ship => "SHIP",
    Air => "AIR",
    Multimodal => "MULTIMODAL",
});

impl TransportMode {
    /// Fuel types the dashboard offers for this mode.
    ///
    /// Informational only. The calculator does not cross-validate mode and fuel,
    /// an incompatible pair simply has no emission factor.
    pub fn typical_fuels(&self) -> &'static [FuelType] {
        match self {
            TransportMode::Truck => &[
                FuelType::Diesel,
                FuelType::Electric,
                FuelType::Hybrid,
                FuelType::Lng,
                FuelType::Biodiesel,
            ],
            TransportMode::Rail => &[FuelType::Diesel, FuelType::Electric],
            TransportMode::Ship => &[FuelType::HeavyFuelOil, FuelType::Diesel, FuelType::Lng],
            TransportMode::Air => &[FuelType::JetFuel],
            TransportMode::Multimodal => &[],
        }
    }
}

/// Fuel or traction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Diesel,
    Electric,
    Hybrid,
    JetFuel,
    HeavyFuelOil,
    Lng,
    Biodiesel,
}

labelled_enum!(FuelType, UnknownFuelType, {
    Diesel => "DIESEL",
    Electric => "ELECTRIC",
    Hybrid => "HYBRID",
    JetFuel => "JET_FUEL",
    HeavyFuelOil => "HEAVY_FUEL_OIL",
    Lng => "LNG",
    Biodiesel => "BIODIESEL",
});

/// Weather along the route, ordered from benign to severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherCondition {
    #[default]
    Normal,
    LightAdverse,
    HeavyAdverse,
    SnowIce,
    Extreme,
}

labelled_enum!(WeatherCondition, UnknownWeatherCondition, {
    Normal => "NORMAL",
    LightAdverse => "LIGHT_ADVERSE",
    HeavyAdverse => "HEAVY_ADVERSE",
    SnowIce => "SNOW_ICE",
    Extreme => "EXTREME",
});

/// GHG Protocol reporting scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Direct emissions from owned or controlled sources.
    ///
    /// Reserved: the calculator classifies all freight as [`Scope::Scope3`].
    #[serde(rename = "SCOPE_1")]
    Scope1,
    /// Indirect emissions from purchased energy.
    ///
    /// Reserved: the calculator classifies all freight as [`Scope::Scope3`].
    #[serde(rename = "SCOPE_2")]
    Scope2,
    /// Value-chain emissions, which covers contracted freight.
    #[serde(rename = "SCOPE_3")]
    Scope3,
}

impl Scope {
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Scope1 => "SCOPE_1",
            Scope::Scope2 => "SCOPE_2",
            Scope::Scope3 => "SCOPE_3",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_back() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.label().parse::<TransportMode>().unwrap(), *mode);
        }
        for fuel in FuelType::ALL {
            assert_eq!(fuel.label().parse::<FuelType>().unwrap(), *fuel);
        }
        for weather in WeatherCondition::ALL {
            assert_eq!(weather.label().parse::<WeatherCondition>().unwrap(), *weather);
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&FuelType::HeavyFuelOil).unwrap(),
            "\"HEAVY_FUEL_OIL\""
        );
        assert_eq!(
            serde_json::to_string(&WeatherCondition::SnowIce).unwrap(),
            "\"SNOW_ICE\""
        );
        assert_eq!(serde_json::to_string(&Scope::Scope3).unwrap(), "\"SCOPE_3\"");

        let mode: TransportMode = serde_json::from_str("\"AIR\"").unwrap();
        assert_eq!(mode, TransportMode::Air);
    }

    #[test]
    fn test_unknown_labels() {
        match "HYDROGEN".parse::<FuelType>() {
            Err(CFIPError::UnknownFuelType(label)) => assert_eq!(label, "HYDROGEN"),
            other => panic!("Expected UnknownFuelType, got {:?}", other),
        }
        assert!("BICYCLE".parse::<TransportMode>().is_err());
        // Labels are case sensitive, matching the factor catalogue keys
        assert!("truck".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_weather_default_is_normal() {
        assert_eq!(WeatherCondition::default(), WeatherCondition::Normal);
    }

    #[test]
    fn test_typical_fuels() {
        assert_eq!(TransportMode::Truck.typical_fuels().len(), 5);
        assert_eq!(TransportMode::Air.typical_fuels(), &[FuelType::JetFuel]);
        assert!(TransportMode::Multimodal.typical_fuels().is_empty());
    }
}
