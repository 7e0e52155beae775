use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum CFIPError {
    #[error("Emission factor not found for {transport_mode} - {fuel_type} (region {region})")]
    FactorNotFound {
        transport_mode: String,
        fuel_type: String,
        region: String,
    },
    #[error("Unknown transport mode: {0}")]
    UnknownTransportMode(String),
    #[error("Unknown fuel type: {0}")]
    UnknownFuelType(String),
    #[error("Unknown weather condition: {0}")]
    UnknownWeatherCondition(String),
    #[error("Duplicate emission factor for {0}")]
    DuplicateFactor(String),
    #[error("Invalid emission factor: {0}")]
    InvalidFactor(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, CFIPError>`.
pub type CFIPResult<T> = Result<T, CFIPError>;
