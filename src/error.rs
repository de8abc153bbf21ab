use crate::config::ConfigError;
use crate::listings::repository::RepositoryError;
use crate::listings::service::ListingServiceError;
use crate::telemetry::TelemetryError;
use crate::trades::source::TradeLookupError;
use std::fmt;

/// Top-level error for embedding services that wire the engine together.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Repository(RepositoryError),
    Listing(ListingServiceError),
    Lookup(TradeLookupError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Repository(err) => write!(f, "repository error: {}", err),
            AppError::Listing(err) => write!(f, "listing error: {}", err),
            AppError::Lookup(err) => write!(f, "trade lookup error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Repository(err) => Some(err),
            AppError::Listing(err) => Some(err),
            AppError::Lookup(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<ListingServiceError> for AppError {
    fn from(value: ListingServiceError) -> Self {
        Self::Listing(value)
    }
}

impl From<TradeLookupError> for AppError {
    fn from(value: TradeLookupError) -> Self {
        Self::Lookup(value)
    }
}
