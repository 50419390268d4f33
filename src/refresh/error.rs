use thiserror::Error;

/// Failure to acquire snapshot records from a data source.
///
/// Every variant is transient: the coordinator reports it and retries on its
/// regular schedule.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data source error: {0}")]
    Source(String),
}
