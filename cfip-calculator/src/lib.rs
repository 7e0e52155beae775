//! Greenhouse-gas emissions calculator for freight shipments
//!
//! Converts the distance, weight, mode and fuel of a shipment, together with the
//! conditions it travels in, into CO2, CH4 and N2O masses and a combined CO2e
//! total.
//!
//! # Module Organisation
//!
//! - `adjustments`: weather, load and traffic adjustment curves
//! - `calculator`: the calculation itself
//! - `request`: conversion of loosely typed dashboard requests
//!
//! # Example
//!
//! ```
//! use cfip_calculator::calculator::{CalculationInput, EmissionsCalculator};
//! use cfip_core::transport::{FuelType, TransportMode, WeatherCondition};
//!
//! let calculator = EmissionsCalculator::seeded();
//! let input = CalculationInput::new(100.0, 10.0, TransportMode::Truck, FuelType::Diesel)
//!     .with_weather(WeatherCondition::HeavyAdverse)
//!     .with_capacity_utilization(85.0);
//!
//! let result = calculator.calculate(&input).unwrap();
//! assert!((result.co2 - 97.0 * 1.10).abs() < 1e-9);
//! ```

pub mod adjustments;
pub mod calculator;
pub mod request;

pub use calculator::{CalculationInput, EmissionBreakdown, EmissionResult, EmissionsCalculator};
pub use request::ShipmentRequest;
