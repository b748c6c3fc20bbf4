use thiserror::Error;

use super::config::ConfigError;
use super::http::HttpError;
use super::metrics::MetricsError;
use super::sink::SinkError;
use super::validation::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    #[must_use]
    pub const fn validation(err: ValidationError) -> Self {
        AppError::Validation(err)
    }

    #[must_use]
    pub const fn config(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
