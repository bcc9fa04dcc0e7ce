//! Crate-level error types.
//!
//! [`PipeguardError`] covers the failures that may legitimately stop the
//! program: bad configuration, terminal I/O, and serialization. Failures
//! inside a fetch never reach this type; they are normalized into a
//! [`ServicePayload`](crate::models::ServicePayload) by the service and the
//! click handler instead.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipeguardError>;

/// Top-level error type returned by setup and front-end APIs.
#[derive(Debug, thiserror::Error)]
pub enum PipeguardError {
    /// An environment variable held an unusable value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal setup, teardown, or log file handling failed.
    #[error("io error: {0}")]
    Io(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The shared HTTP client could not be built.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
