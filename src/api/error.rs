//! Survey API-specific error types.

/// Errors that can occur while talking to the survey server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A mutating request was attempted before the CSRF token was fetched
    #[error("CSRF token has not been acquired")]
    CsrfTokenMissing,
}
