//! Error types for DNS record publishing.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed (DNS, refused, reset, TLS).
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond in time.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Failure of a single request attempt.
///
/// Whether it is worth another attempt is decided by
/// [`IsRetryable`](super::IsRetryable).
#[derive(Debug, Error)]
pub enum RetryableError {
    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The provider answered with a non-2xx status.
    #[error("Provider returned {status}{}", body.as_deref().map(|b| format!(": {b}")).unwrap_or_default())]
    NonSuccessStatus {
        /// Response status
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },
}

/// Error type for publishing a record.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The endpoint URL cannot carry a path.
    #[error("Endpoint {endpoint} cannot be used as a base URL")]
    InvalidEndpoint {
        /// The configured endpoint
        endpoint: String,
    },

    /// The request body could not be encoded.
    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The request failed with an error that retrying cannot fix.
    #[error("Publish failed: {0}")]
    Request(#[source] RetryableError),

    /// Every attempt failed with a transient error.
    #[error("Publish failed after {attempts} attempt(s): {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last_error: RetryableError,
    },
}
