//! Core types for freight carbon-footprint calculations.
//!
//! This crate holds everything the emissions calculator consumes but does not
//! compute itself:
//!
//! - [`transport`]: transport modes, fuel types, weather conditions and
//!   reporting scopes
//! - [`factors`]: emission-factor records, the lookup capability and the
//!   seeded reference catalogue
//! - [`parameters`]: numeric policy constants (GWP values, aviation multiplier)
//! - [`config`]: TOML configuration combining parameters and a factor catalogue

pub mod config;
pub mod errors;
pub mod factors;
pub mod parameters;
pub mod transport;

/// Floating point type used for all physical quantities.
pub type FloatValue = f64;
