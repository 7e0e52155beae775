//! Emission-factor reference data.
//!
//! An [`EmissionFactor`] gives the emissions intensity of one
//! (transport mode, fuel type, region) combination per tonne-kilometre moved.
//! Factors are published by regulatory and scientific bodies (EPA, IPCC, IMO,
//! ICAO) and versioned by year.
//!
//! The calculator only ever reads factors through the [`EmissionFactorLookup`]
//! capability. [`EmissionFactorTable`] is the in-memory implementation, and
//! [`DEFAULT_EMISSION_FACTORS`] holds the seeded reference catalogue.
//!
//! # Units
//!
//! | Field | Unit |
//! |-------|------|
//! | `co2_factor` | kg CO2 / (t km) |
//! | `ch4_factor` | g CH4 / (t km) |
//! | `n2o_factor` | g N2O / (t km) |
//!
//! Note the mixed units: CH4 and N2O are stored in grams and must be divided by
//! [`GRAMS_PER_KILOGRAM`] before being combined with CO2.

use crate::errors::{CFIPError, CFIPResult};
use crate::transport::{FuelType, TransportMode};
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Region used for every seeded factor.
pub const GLOBAL_REGION: &str = "GLOBAL";

/// Conversion between the stored CH4/N2O unit (g) and the reported unit (kg).
pub const GRAMS_PER_KILOGRAM: FloatValue = 1000.0;

fn default_region() -> String {
    GLOBAL_REGION.to_string()
}

/// Emissions intensity for a single (mode, fuel, region) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub transport_mode: TransportMode,
    pub fuel_type: FuelType,
    /// Geographic scope of the factor
    /// default: "GLOBAL"
    #[serde(default = "default_region")]
    pub region: String,
    /// unit: kg CO2 / (t km)
    pub co2_factor: FloatValue,
    /// unit: g CH4 / (t km)
    ///
    /// Missing values are treated as zero.
    #[serde(default)]
    pub ch4_factor: Option<FloatValue>,
    /// unit: g N2O / (t km)
    ///
    /// Missing values are treated as zero.
    #[serde(default)]
    pub n2o_factor: Option<FloatValue>,
    /// Publishing body, e.g. "EPA"
    #[serde(default)]
    pub source: Option<String>,
    /// Publication year of the factor
    #[serde(default)]
    pub year: Option<u16>,
}

impl EmissionFactor {
    pub fn new(
        transport_mode: TransportMode,
        fuel_type: FuelType,
        region: impl Into<String>,
        co2_factor: FloatValue,
        ch4_factor: Option<FloatValue>,
        n2o_factor: Option<FloatValue>,
    ) -> Self {
        Self {
            transport_mode,
            fuel_type,
            region: region.into(),
            co2_factor,
            ch4_factor,
            n2o_factor,
            source: None,
            year: None,
        }
    }

    /// Attach provenance to the factor.
    pub fn with_source(mut self, source: impl Into<String>, year: u16) -> Self {
        self.source = Some(source.into());
        self.year = Some(year);
        self
    }

    pub fn key(&self) -> FactorKey {
        FactorKey::new(self.transport_mode, self.fuel_type, self.region.clone())
    }

    /// CH4 factor in g / (t km), zero when not reported.
    pub fn ch4_factor_or_zero(&self) -> FloatValue {
        self.ch4_factor.unwrap_or(0.0)
    }

    /// N2O factor in g / (t km), zero when not reported.
    pub fn n2o_factor_or_zero(&self) -> FloatValue {
        self.n2o_factor.unwrap_or(0.0)
    }

    /// Check that every factor is finite and non-negative.
    pub fn validate(&self) -> CFIPResult<()> {
        let values = [
            ("co2_factor", Some(self.co2_factor)),
            ("ch4_factor", self.ch4_factor),
            ("n2o_factor", self.n2o_factor),
        ];
        for (name, value) in values {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(CFIPError::InvalidFactor(format!(
                        "{} for {} must be finite and non-negative, got {}",
                        name,
                        self.key(),
                        v
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Unique key of an [`EmissionFactor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactorKey {
    pub transport_mode: TransportMode,
    pub fuel_type: FuelType,
    pub region: String,
}

impl FactorKey {
    pub fn new(transport_mode: TransportMode, fuel_type: FuelType, region: impl Into<String>) -> Self {
        Self {
            transport_mode,
            fuel_type,
            region: region.into(),
        }
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.transport_mode, self.fuel_type, self.region)
    }
}

/// Read-only access to emission factors.
///
/// A miss is reported as `None`; the caller decides how to surface it.
/// Implementations backed by storage may block inside `get_factor`, this is the
/// only point where a calculation can wait.
pub trait EmissionFactorLookup: Send + Sync {
    fn get_factor(
        &self,
        transport_mode: TransportMode,
        fuel_type: FuelType,
        region: &str,
    ) -> Option<EmissionFactor>;
}

impl<T: EmissionFactorLookup + ?Sized> EmissionFactorLookup for &T {
    fn get_factor(
        &self,
        transport_mode: TransportMode,
        fuel_type: FuelType,
        region: &str,
    ) -> Option<EmissionFactor> {
        (**self).get_factor(transport_mode, fuel_type, region)
    }
}

impl<T: EmissionFactorLookup + ?Sized> EmissionFactorLookup for Arc<T> {
    fn get_factor(
        &self,
        transport_mode: TransportMode,
        fuel_type: FuelType,
        region: &str,
    ) -> Option<EmissionFactor> {
        (**self).get_factor(transport_mode, fuel_type, region)
    }
}

/// In-memory emission-factor catalogue holding at most one record per key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionFactorTable {
    factors: BTreeMap<FactorKey, EmissionFactor>,
}

impl EmissionFactorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the seeded reference catalogue.
    pub fn seeded() -> Self {
        DEFAULT_EMISSION_FACTORS.clone()
    }

    /// Build a table from a list of records.
    ///
    /// Every record is validated, and two records sharing a key are rejected.
    pub fn from_factors(factors: impl IntoIterator<Item = EmissionFactor>) -> CFIPResult<Self> {
        let mut table = Self::new();
        for factor in factors {
            factor.validate()?;
            let key = factor.key();
            if table.factors.contains_key(&key) {
                return Err(CFIPError::DuplicateFactor(key.to_string()));
            }
            table.factors.insert(key, factor);
        }
        log::debug!("Built emission factor table with {} records", table.len());
        Ok(table)
    }

    /// Insert a record, replacing any existing record with the same key.
    ///
    /// Returns the replaced record.
    pub fn upsert(&mut self, factor: EmissionFactor) -> CFIPResult<Option<EmissionFactor>> {
        factor.validate()?;
        let key = factor.key();
        let previous = self.factors.insert(key, factor);
        if let Some(previous) = &previous {
            log::debug!("Replaced emission factor {}", previous.key());
        }
        Ok(previous)
    }

    pub fn get(&self, key: &FactorKey) -> Option<&EmissionFactor> {
        self.factors.get(key)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Records in key order.
    pub fn iter(&self) -> impl Iterator<Item = &EmissionFactor> {
        self.factors.values()
    }
}

impl EmissionFactorLookup for EmissionFactorTable {
    fn get_factor(
        &self,
        transport_mode: TransportMode,
        fuel_type: FuelType,
        region: &str,
    ) -> Option<EmissionFactor> {
        self.get(&FactorKey::new(transport_mode, fuel_type, region))
            .cloned()
    }
}

/// Seeded reference catalogue (2024 publications, global region).
pub static DEFAULT_EMISSION_FACTORS: LazyLock<EmissionFactorTable> = LazyLock::new(|| {
    use FuelType::*;
    use TransportMode::*;

    let seed = [
        // Road
        (Truck, Diesel, 0.0970, 0.0015, 0.0032, "EPA"),
        (Truck, Electric, 0.0150, 0.0000, 0.0000, "EPA"),
        (Truck, Hybrid, 0.0580, 0.0008, 0.0016, "EPA"),
        (Truck, Lng, 0.0850, 0.0020, 0.0010, "EPA"),
        (Truck, Biodiesel, 0.0820, 0.0012, 0.0025, "EPA"),
        // Rail
        (Rail, Diesel, 0.0300, 0.0008, 0.0015, "IPCC"),
        (Rail, Electric, 0.0080, 0.0000, 0.0000, "IPCC"),
        // Maritime
        (Ship, HeavyFuelOil, 0.0150, 0.0005, 0.0008, "IMO"),
        (Ship, Diesel, 0.0140, 0.0004, 0.0007, "IMO"),
        (Ship, Lng, 0.0120, 0.0015, 0.0003, "IMO"),
        // Air
        (Air, JetFuel, 0.5000, 0.0020, 0.0100, "ICAO"),
    ];

    let mut table = EmissionFactorTable::new();
    for (mode, fuel, co2, ch4, n2o, source) in seed {
        table.factors.insert(
            FactorKey::new(mode, fuel, GLOBAL_REGION),
            EmissionFactor::new(mode, fuel, GLOBAL_REGION, co2, Some(ch4), Some(n2o))
                .with_source(source, 2024),
        );
    }
    table
});
