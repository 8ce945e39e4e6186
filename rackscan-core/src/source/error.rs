use thiserror::Error;

/// Errors from [`crate::FacilitySource`] and [`crate::AddressLookup`] calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request could not be built, e.g. a malformed base URL.
    #[error("invalid request URL {url:?}: {message}")]
    InvalidUrl {
        /// The URL as configured.
        url: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The service could not be reached.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Fully qualified request URL.
        url: String,
        /// Transport diagnostic.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with status {status}: {message}")]
    HttpError {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("failed to parse response from {url}: {message}")]
    ParseError {
        /// Fully qualified request URL.
        url: String,
        /// Decoder diagnostic.
        message: String,
    },
}
