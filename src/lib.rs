//! Freight carbon-footprint calculation engine.
//!
//! Re-exports the workspace crates under one name:
//!
//! - [`cfip_core`]: data model, emission-factor catalogue and configuration
//! - [`cfip_calculator`]: the emissions calculator
//!
//! Python bindings are available with the `python` feature.

pub use cfip_calculator;
pub use cfip_core;

#[cfg(feature = "python")]
pub mod python;
