use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("{message}")]
    Histogram { message: String },
}
