use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart configuration: {0}")]
    Configuration(String),

    /// Reported by a feature source whose fetch failed.
    #[error("feature source failure: {0}")]
    Source(String),

    #[error("chart backend failure: {0}")]
    Backend(String),
}

/// Failure payload delivered through the `process_failed` channel.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid service url: {0}")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
