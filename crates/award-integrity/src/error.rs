use crate::awards::source::SourceError;
use crate::awards::RawAwardError;
use crate::config::ConfigError;
use crate::insights::job::InsightJobError;
use crate::insights::store::StoreError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Awards(RawAwardError),
    Source(SourceError),
    Store(StoreError),
    Job(InsightJobError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Awards(err) => write!(f, "award input error: {}", err),
            AppError::Source(err) => write!(f, "award source error: {}", err),
            AppError::Store(err) => write!(f, "insight store error: {}", err),
            AppError::Job(err) => write!(f, "insight job error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Awards(err) => Some(err),
            AppError::Source(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Job(err) => Some(err),
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

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RawAwardError> for AppError {
    fn from(value: RawAwardError) -> Self {
        Self::Awards(value)
    }
}

impl From<SourceError> for AppError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<InsightJobError> for AppError {
    fn from(value: InsightJobError) -> Self {
        Self::Job(value)
    }
}
