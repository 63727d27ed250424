//! Error types for merchant-rs

use thiserror::Error;

/// Result type alias for merchant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the decision pipeline
///
/// Lookup failures propagate to the coordinator's caller unchanged; there are
/// no silent defaults and no partial strategies.
#[derive(Error, Debug)]
pub enum Error {
    /// A required financial metric is absent from the source
    #[error("required metric not found in financial source: {0}")]
    MetricNotFound(String),

    /// No record exists for the requested product
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Monthly burn rate is zero or negative, so runway is undefined
    #[error("monthly burn rate must be positive, got {0}")]
    NonPositiveBurnRate(f64),

    /// The reasoning engine was unreachable, errored, timed out, or
    /// returned an empty decision
    #[error("reasoning engine failure: {0}")]
    EngineFailure(String),

    /// The durable audit append failed
    #[error("audit log write failed: {0}")]
    LogWriteFailure(String),

    /// An input table could not be read or parsed
    #[error("data source error: {0}")]
    Source(String),

    /// Internal error with no more specific classification
    #[error("{0}")]
    Other(String),
}
