//! Transport error types.

/// Errors raised while talking to an upstream provider.
///
/// All of these are fatal to the current call; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failure, timeout or body read failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential rejected by the provider
    #[error("unauthorized: check the configured API credentials")]
    Unauthorized,

    /// Provider returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Endpoint URL could not be built
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// No canned response registered for a mock request
    #[error("no mock response for {0}")]
    Mock(String),
}
