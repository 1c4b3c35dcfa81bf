//! NEIS client error types.

/// Errors that can occur when talking to the NEIS open data service.
#[derive(Debug, thiserror::Error)]
pub enum NeisError {
    /// HTTP request failed (network error, connect timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered with an error `RESULT` code
    #[error("NEIS error {code}: {message}")]
    Service { code: String, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The request did not complete before its deadline
    #[error("request timed out")]
    Timeout,

    /// Client could not be built from its configuration
    #[error("invalid client configuration: {message}")]
    Config { message: String },
}
